use serde::Serialize;

/// Endpoint that takes query parameters.
pub trait Method {
    const PATH: &'static str;

    type Response: serde::de::DeserializeOwned;
    type Params: Serialize;
}

/// Endpoint without parameters.
pub trait Method0 {
    const PATH: &'static str;

    type Response: serde::de::DeserializeOwned;
}
