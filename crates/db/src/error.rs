use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("failed to connect to the database at {host}:{port}: {source}")]
    Connection {
        host: String,
        port: u16,
        #[source]
        source: sqlx::Error,
    },

    #[error("database did not answer the liveness query: {0}")]
    Ping(#[source] sqlx::Error),

    #[error("schema statement '{module}/{id}' failed: {source}")]
    Schema {
        module: String,
        id: &'static str,
        #[source]
        source: sqlx::Error,
    },
}
