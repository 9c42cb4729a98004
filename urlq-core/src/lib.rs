//! Typed application state stored in the URL query string.
//!
//! Each parameter is read through a [`QueryParamCodec`]. Decoded values are
//! memoized by their encoded content, so an `Rc` returned for an unchanged
//! parameter stays the same across evaluations. Setters encode new values and
//! hand them to the dispatcher, which makes exactly one `push` or `replace`
//! call on the [`Navigator`].
//!
//! ```
//! use std::rc::Rc;
//! use urlq_core::params::{NumberParam, StringParam};
//! use urlq_core::{
//!     Changes, LocationSource, MemoryHistory, ParamConfigMap, ParamsBinding,
//!     QueryParamContext, UpdateType,
//! };
//!
//! let history = Rc::new(MemoryHistory::new("/list?page=2&filter=active"));
//! let ctx = QueryParamContext::from_history(history.clone());
//!
//! let mut binding = ParamsBinding::new(
//!     ParamConfigMap::new()
//!         .param("page", NumberParam)
//!         .param("filter", StringParam),
//! )?;
//! let (state, set_query) = binding.bind(&ctx)?;
//! assert_eq!(state.get::<f64>("page"), Some(&2.0));
//!
//! set_query.set(Changes::new().set("page", 3.0), Some(UpdateType::PushIn))?;
//! assert_eq!(history.location().to_string(), "/list?page=3&filter=active");
//! # Ok::<(), urlq_core::QueryParamError>(())
//! ```

mod binding;
mod bindings;
mod codec;
mod config;
mod context;
mod dispatch;
mod encoded;
mod error;
mod location;
pub mod params;
mod query_string;
mod snapshot;
mod update_type;

pub use binding::{ParamBinding, ParamSetter};
pub use bindings::{Changes, DecodedState, ParamConfigMap, ParamsBinding, ParamsSetter};
pub use codec::QueryParamCodec;
pub use config::QueryParamOptions;
pub use context::QueryParamContext;
pub use dispatch::{dispatch, target_location, target_query, ChangeRequest};
pub use encoded::EncodedValue;
pub use error::{CodecError, QueryParamError};
pub use location::{Location, LocationSource, MemoryHistory, NavigationKind, Navigator};
pub use query_string::{QueryStringCodec, UrlEncodedQuery};
pub use snapshot::{read_snapshot, Snapshot};
pub use update_type::{ParseUpdateTypeError, UpdateType};
