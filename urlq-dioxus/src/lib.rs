//! Dioxus hooks for URL query-parameter bindings
//!
//! Install a provider near the root with [`use_query_param_provider`], then
//! read and write parameters from any descendant:
//!
//! ```ignore
//! let (page, set_page) = use_query_param("page", || NumberParam)?;
//! ```
//!
//! Bindings live in hook slots, so their memoized values survive re-renders.
//! Navigations made through the provider's context bump a revision signal,
//! which re-renders every component that read a parameter.

use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;
use urlq_core::params::StringParam;
use urlq_core::{
    DecodedState, Location, ParamBinding, ParamConfigMap, ParamSetter, ParamsBinding,
    ParamsSetter, QueryParamCodec, QueryParamContext, QueryParamError,
};

#[cfg(feature = "router")]
mod router;
#[cfg(feature = "router")]
pub use router::RouterHistory;

/// Query param context shared through the Dioxus context API.
#[derive(Clone)]
pub struct UrlQueryContext {
    inner: QueryParamContext,
    revision: Signal<u64>,
}

impl UrlQueryContext {
    fn new(ctx: QueryParamContext, revision: Signal<u64>) -> Self {
        let inner = match ctx.navigator() {
            Ok(navigator) => {
                let notifying = NotifyingNavigator {
                    inner: navigator.clone(),
                    revision,
                };
                ctx.clone().with_navigator(Rc::new(notifying))
            }
            Err(_) => ctx,
        };
        Self { inner, revision }
    }

    pub fn context(&self) -> &QueryParamContext {
        &self.inner
    }

    /// Re-render every subscribed component. Call this after the URL was
    /// changed by something other than this context's navigator.
    pub fn notify_location_changed(&self) {
        debug!("Location changed outside the query param navigator");
        let mut revision = self.revision;
        *revision.write() += 1;
    }

    /// Subscribe the current component to location changes.
    fn track(&self) -> u64 {
        *self.revision.read()
    }
}

/// Forwards navigations and then bumps the revision signal.
struct NotifyingNavigator {
    inner: Rc<dyn urlq_core::Navigator>,
    revision: Signal<u64>,
}

impl NotifyingNavigator {
    fn bump(&self) {
        let mut revision = self.revision;
        *revision.write() += 1;
    }
}

impl urlq_core::Navigator for NotifyingNavigator {
    fn push(&self, location: &Location) {
        self.inner.push(location);
        self.bump();
    }

    fn replace(&self, location: &Location) {
        self.inner.replace(location);
        self.bump();
    }
}

/// Provide a query param context to all descendants.
///
/// `init` runs once, on the first render.
pub fn use_query_param_provider(init: impl FnOnce() -> QueryParamContext) -> UrlQueryContext {
    let revision = use_signal(|| 0u64);
    use_context_provider(move || UrlQueryContext::new(init(), revision))
}

fn provided_context(ctx: Option<UrlQueryContext>) -> Result<UrlQueryContext, QueryParamError> {
    ctx.ok_or(QueryParamError::MissingContext("query param provider"))
}

/// Read one parameter and get a setter for it.
///
/// `name` is read and `codec` runs only on the first render; later renders
/// keep that binding even if they pass a different name. The returned `Rc` is
/// stable while the parameter's encoded value is unchanged.
pub fn use_query_param<C: QueryParamCodec>(
    name: &str,
    codec: impl FnOnce() -> C,
) -> Result<(Option<Rc<C::Value>>, ParamSetter<C>), QueryParamError> {
    let ctx = try_use_context::<UrlQueryContext>();
    let slot = use_hook(|| Rc::new(RefCell::new(ParamBinding::new(name, codec()))));

    let ctx = provided_context(ctx)?;
    ctx.track();
    let mut slot = slot.borrow_mut();
    let binding = slot.as_mut().map_err(|e| e.clone())?;
    binding.bind(ctx.context(), None)
}

/// [`use_query_param`] with the default string codec.
pub fn use_string_param(
    name: &str,
) -> Result<(Option<Rc<String>>, ParamSetter<StringParam>), QueryParamError> {
    use_query_param(name, || StringParam)
}

/// Read a set of parameters from one snapshot and get a batch setter.
///
/// `config` runs only on the first render, so later renders cannot change
/// the parameter set. The returned state keeps its `Rc` while none of its
/// values changed.
pub fn use_query_params(
    config: impl FnOnce() -> ParamConfigMap,
) -> Result<(Rc<DecodedState>, ParamsSetter), QueryParamError> {
    let ctx = try_use_context::<UrlQueryContext>();
    let slot = use_hook(|| Rc::new(RefCell::new(ParamsBinding::new(config()))));

    let ctx = provided_context(ctx)?;
    ctx.track();
    let mut slot = slot.borrow_mut();
    let binding = slot.as_mut().map_err(|e| e.clone())?;
    binding.bind(ctx.context())
}

/// The provider's context, for calling [`UrlQueryContext::notify_location_changed`].
pub fn use_url_query_context() -> Result<UrlQueryContext, QueryParamError> {
    provided_context(try_use_context::<UrlQueryContext>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use urlq_core::params::NumberParam;
    use urlq_core::{LocationSource as _, MemoryHistory, Navigator as _};

    thread_local! {
        static HISTORY: RefCell<Option<Rc<MemoryHistory>>> = const { RefCell::new(None) };
        static PROVIDED: RefCell<Option<UrlQueryContext>> = const { RefCell::new(None) };
        static PAGE_SETTER: RefCell<Option<ParamSetter<NumberParam>>> = const { RefCell::new(None) };
        static PAGES: RefCell<Vec<Result<Option<f64>, String>>> = const { RefCell::new(Vec::new()) };
        static FILTERS: RefCell<Vec<Option<String>>> = const { RefCell::new(Vec::new()) };
        static RENAMED: std::cell::Cell<bool> = const { std::cell::Cell::new(false) };
        static NAMED: RefCell<Vec<Option<(String, String)>>> = const { RefCell::new(Vec::new()) };
    }

    #[component]
    fn PageReader() -> Element {
        let page = match use_query_param("page", || NumberParam) {
            Ok((page, setter)) => {
                PAGE_SETTER.with(|s| *s.borrow_mut() = Some(setter));
                Ok(page.map(|p| *p))
            }
            Err(e) => Err(e.to_string()),
        };
        PAGES.with(|pages| pages.borrow_mut().push(page));
        rsx! {}
    }

    #[component]
    fn FilterReader() -> Element {
        let state = use_query_params(|| {
            ParamConfigMap::new()
                .param("page", NumberParam)
                .string("filter")
        });
        let filter = state
            .ok()
            .and_then(|(state, _)| state.get::<String>("filter").cloned());
        FILTERS.with(|filters| filters.borrow_mut().push(filter));
        rsx! {}
    }

    fn provided_app() -> Element {
        let ctx = use_query_param_provider(|| {
            let history = HISTORY.with(|h| h.borrow().clone()).unwrap();
            QueryParamContext::from_history(history)
        });
        PROVIDED.with(|p| *p.borrow_mut() = Some(ctx));
        rsx! {
            PageReader {}
            FilterReader {}
        }
    }

    #[component]
    fn RenamingReader() -> Element {
        let name = if RENAMED.with(|r| r.get()) { "filter" } else { "page" };
        let value = use_string_param(name)
            .ok()
            .and_then(|(value, setter)| Some((setter.name().to_string(), (*value?).clone())));
        NAMED.with(|named| named.borrow_mut().push(value));
        rsx! {}
    }

    fn renaming_app() -> Element {
        let ctx = use_query_param_provider(|| {
            let history = HISTORY.with(|h| h.borrow().clone()).unwrap();
            QueryParamContext::from_history(history)
        });
        PROVIDED.with(|p| *p.borrow_mut() = Some(ctx));
        rsx! {
            RenamingReader {}
        }
    }

    fn bare_app() -> Element {
        rsx! {
            PageReader {}
        }
    }

    fn mount(url: &str) -> (VirtualDom, Rc<MemoryHistory>) {
        let history = Rc::new(MemoryHistory::new(url));
        HISTORY.with(|h| *h.borrow_mut() = Some(history.clone()));
        let mut dom = VirtualDom::new(provided_app);
        dom.rebuild_in_place();
        (dom, history)
    }

    fn last_page() -> Option<Result<Option<f64>, String>> {
        PAGES.with(|pages| pages.borrow().last().cloned())
    }

    fn page_renders() -> usize {
        PAGES.with(|pages| pages.borrow().len())
    }

    #[test]
    fn test_hooks_read_from_provider() {
        let (_dom, _history) = mount("/list?page=2&filter=active");

        assert_eq!(last_page(), Some(Ok(Some(2.0))));
        FILTERS.with(|filters| {
            assert_eq!(filters.borrow().last(), Some(&Some("active".to_string())))
        });
    }

    #[test]
    fn test_hooks_without_provider() {
        let mut dom = VirtualDom::new(bare_app);
        dom.rebuild_in_place();

        let last = last_page();
        assert!(matches!(last, Some(Err(msg)) if msg.contains("query param provider")));
    }

    #[test]
    fn test_setter_rerenders_readers() {
        let (mut dom, history) = mount("/list?page=2&filter=active");
        let renders = page_renders();
        let setter = PAGE_SETTER.with(|s| s.borrow().clone()).unwrap();

        dom.in_runtime(|| setter.set(Some(&3.0), None)).unwrap();
        dom.render_immediate_to_vec();

        assert_eq!(history.location().to_string(), "/list?page=3&filter=active");
        assert!(page_renders() > renders);
        assert_eq!(last_page(), Some(Ok(Some(3.0))));
        FILTERS.with(|filters| {
            assert_eq!(filters.borrow().last(), Some(&Some("active".to_string())))
        });
    }

    #[test]
    fn test_notify_location_changed_rerenders_readers() {
        let (mut dom, history) = mount("/list?page=2");
        let renders = page_renders();
        let ctx = PROVIDED.with(|p| p.borrow().clone()).unwrap();

        // Navigation made behind the provider's back
        history.push(&Location::parse("/list?page=5"));
        dom.render_immediate_to_vec();
        assert_eq!(page_renders(), renders);

        dom.in_runtime(|| ctx.notify_location_changed());
        dom.render_immediate_to_vec();

        assert!(page_renders() > renders);
        assert_eq!(last_page(), Some(Ok(Some(5.0))));
    }

    #[test]
    fn test_name_fixed_after_first_render() {
        HISTORY.with(|h| {
            *h.borrow_mut() = Some(Rc::new(MemoryHistory::new("/list?page=2&filter=active")))
        });
        let mut dom = VirtualDom::new(renaming_app);
        dom.rebuild_in_place();
        let ctx = PROVIDED.with(|p| p.borrow().clone()).unwrap();

        RENAMED.with(|r| r.set(true));
        dom.in_runtime(|| ctx.notify_location_changed());
        dom.render_immediate_to_vec();

        NAMED.with(|named| {
            let named = named.borrow();
            assert_eq!(named.len(), 2);
            assert_eq!(named.last(), Some(&Some(("page".to_string(), "2".to_string()))));
        });
    }
}
