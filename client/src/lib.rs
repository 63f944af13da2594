pub use crate::config::ClientConfig;
pub use crate::error::{ApiError, Error, Result};
pub use crate::http::Client;
pub use crate::payload::{CsvExport, Notification, NotificationsQuery};
pub use crate::responses::*;
pub use crate::transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};

pub mod classify;
pub mod config;
pub mod error;
pub mod http;
pub mod payload;
pub mod responses;
pub mod transport;
