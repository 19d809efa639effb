use anyhow::{anyhow, Result};
use leptos::{create_resource, Resource, Serializable};
use tracing::{debug, error};

use crate::config::{KUBE_API_URL, ROLLOUTS_API_URL};

pub fn rollouts_url(namespace: &str) -> String {
    format!("{ROLLOUTS_API_URL}/rollouts/{namespace}/info")
}

pub fn rollout_url(namespace: &str, name: &str) -> String {
    format!("{ROLLOUTS_API_URL}/rollouts/{namespace}/{name}/info")
}

pub fn undo_url(namespace: &str, name: &str, revision: i64) -> String {
    format!("{ROLLOUTS_API_URL}/rollouts/{namespace}/{name}/undo/{revision}")
}

pub fn custom_object_url(
    group: &str,
    version: &str,
    namespace: &str,
    plural: &str,
    name: &str,
) -> String {
    format!("{KUBE_API_URL}/apis/{group}/{version}/namespaces/{namespace}/{plural}/{name}")
}

pub fn create_request<T>(url: impl Fn() -> String + 'static) -> Resource<String, T>
where
    // Errors are logged and replaced with the default value of the expected type.
    T: Serializable + Default + 'static,
{
    create_resource(url, move |url| async move {
        match perform_request(&url).await {
            Ok(value) => value,
            Err(err) => {
                error!(url, "request error: {err}");
                T::default()
            }
        }
    })
}

/// Reads a namespaced custom object through the kubernetes api.
pub async fn get_custom_object<T: Serializable>(
    group: &str,
    version: &str,
    namespace: &str,
    plural: &str,
    name: &str,
) -> Result<T> {
    perform_request(&custom_object_url(group, version, namespace, plural, name)).await
}

pub async fn rollback(namespace: &str, name: &str, revision: i64) -> Result<()> {
    let url = undo_url(namespace, name, revision);

    reqwest::Client::new()
        .put(&url)
        .json(&serde_json::json!({}))
        .send()
        .await?
        .error_for_status()?;

    debug!(url, "rollback requested");

    Ok(())
}

async fn perform_request<R: Serializable>(url: &str) -> Result<R> {
    let client = reqwest::Client::new();
    let response = client.get(url).send().await?.error_for_status()?;
    let json = response.text().await?;

    debug!(url, bytes = json.len(), "response received");

    R::de(&json).map_err(|err| anyhow!("deserialization error: {err}"))
}
