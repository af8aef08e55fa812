use serde::Serialize;

pub trait Method {
    const PATH: &'static str;

    type Response: serde::de::DeserializeOwned;
    type Params: Serialize;

    /// Path segment appended to `PATH`, e.g. the ticker symbol.
    fn resource(params: &Self::Params) -> &str;
}
