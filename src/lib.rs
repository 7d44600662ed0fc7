pub mod configs;
pub mod provider;

pub use provider::api::isbndb::Client;
pub use provider::api::{Collection, Credential, Grammar, Request, RequestBuilder};
pub use provider::error::{ClientError, RequestError, TransportError};
pub use provider::transport::{HttpTransport, Transport};
