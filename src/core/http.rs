use std::time::Duration;

use reqwest::{
    header::{
        ACCEPT,
        USER_AGENT,
    },
    Client,
    Response,
};
use serde::Serialize;

use crate::core::CubeError;

pub fn http_client(timeout_secs: u64) -> Result<Client, CubeError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| CubeError::Custom(format!("HTTP client build failed: {e}")))
}

/// POST a JSON body and hand back the response once its status is known to be 2xx.
pub async fn post_json<B: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    user_agent: &str,
    body: &B,
) -> Result<Response, CubeError> {
    let resp = client
        .post(url)
        .header(USER_AGENT, user_agent)
        .header(ACCEPT, "application/json")
        .json(body)
        .send()
        .await?;

    ensure_success(&resp)?;
    Ok(resp)
}

fn ensure_success(resp: &Response) -> Result<(), CubeError> {
    if !resp.status().is_success() {
        return Err(CubeError::LookupStatus {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(())
}
