use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct GraphQLRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLBody<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLMessage>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLMessage {
    pub message: String,
}
