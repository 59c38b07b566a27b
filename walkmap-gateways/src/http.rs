use reqwest::{Request, Response};
use serde::de::DeserializeOwned;
use walkmap_boundary as json;
use walkmap_core::gateways::GatewayError;

pub fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_decode() {
        GatewayError::Response(err.to_string())
    } else {
        GatewayError::Transport(err.to_string())
    }
}

pub async fn execute(client: &reqwest::Client, request: Request) -> Result<Response, GatewayError> {
    // The query might contain credentials.
    log::debug!("{} {}", request.method(), request.url().path());
    let response = client.execute(request).await.map_err(transport_error)?;
    ensure_success(response).await
}

async fn ensure_success(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    // ensure we've got 2xx status
    if status.is_success() {
        return Ok(response);
    }
    match response.json::<json::Error>().await {
        Ok(err) if !err.message.is_empty() => {
            log::warn!("Request failed with status {status}: {}", err.message);
        }
        _ => {
            log::warn!("Request failed with status {status}");
        }
    }
    Err(GatewayError::Status(status.as_u16()))
}

pub async fn into_json<T>(response: Response) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
{
    response
        .json()
        .await
        .map_err(|err| GatewayError::Response(err.to_string()))
}
