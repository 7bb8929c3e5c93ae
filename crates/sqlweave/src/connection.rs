//! Connections as sources of dialects.
//!
//! A backend connection knows which dialect its statements must be rendered
//! in and owns the escape primitives that dialect relies on.

use crate::dialect::Dialect;

/// Something that can hand out the dialect its statements are rendered in.
pub trait DialectProvider {
    type Dialect: Dialect;

    fn dialect(&self) -> Self::Dialect;
}

#[cfg(feature = "postgres")]
pub use pg::PgServerEscaper;

#[cfg(feature = "postgres")]
mod pg {
    use super::DialectProvider;
    use crate::dialect::PostgresDialect;
    use crate::error::SqlResult;
    use crate::escape::PgEscape;
    use std::sync::Arc;
    use tokio::runtime::Handle;
    use tokio_postgres::Client;

    /// Escaping done by the server through `quote_literal` / `quote_ident`.
    ///
    /// Each call makes a round trip and blocks the current thread on `handle`
    /// until it completes. Do not use it from inside an async task running on
    /// the same runtime; `Handle::block_on` panics there.
    #[derive(Clone)]
    pub struct PgServerEscaper {
        client: Arc<Client>,
        handle: Handle,
    }

    impl std::fmt::Debug for PgServerEscaper {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("PgServerEscaper").finish_non_exhaustive()
        }
    }

    impl PgServerEscaper {
        pub fn new(client: Arc<Client>, handle: Handle) -> Self {
            Self { client, handle }
        }

        pub fn client(&self) -> &Client {
            &self.client
        }

        fn quote(&self, function: &str, value: &str) -> SqlResult<String> {
            let sql = format!("SELECT {function}($1::text)");
            let row = self
                .handle
                .block_on(self.client.query_one(sql.as_str(), &[&value]))?;
            Ok(row.try_get::<_, String>(0)?)
        }
    }

    impl PgEscape for PgServerEscaper {
        fn escape_literal(&self, value: &str) -> SqlResult<String> {
            self.quote("quote_literal", value)
        }

        fn escape_identifier(&self, name: &str) -> SqlResult<String> {
            self.quote("quote_ident", name)
        }
    }

    impl DialectProvider for PgServerEscaper {
        type Dialect = PostgresDialect<PgServerEscaper>;

        fn dialect(&self) -> Self::Dialect {
            PostgresDialect::with_escaper(self.clone())
        }
    }
}
