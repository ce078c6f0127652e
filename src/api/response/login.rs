use serde::Deserialize;

/* POST /login. A body without a token does not parse. */
#[derive(Debug, Deserialize)]
pub struct Login {
    pub token: String,
}
