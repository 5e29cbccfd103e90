//! Supabase PostgREST client for the `reminders` and `profile` tables.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ProfileStore, ReminderFilter, ReminderStore, StoreError, StoreResult};
use crate::auth::parse_api_error;
use crate::config::ClientConfig;
use crate::models::{NewReminder, Profile, Reminder, ReminderId, ReminderPatch};

const REMINDERS_TABLE: &str = "reminders";
const PROFILE_TABLE: &str = "profile";
const SINGLE_OBJECT_MEDIA_TYPE: &str = "application/vnd.pgrst.object+json";

/// Thin HTTP wrapper around one project's `/rest/v1` endpoint
#[derive(Clone)]
pub struct PostgrestClient {
    rest_url: String,
    anon_key: String,
    client: Client,
}

impl PostgrestClient {
    pub fn new(config: &ClientConfig) -> StoreResult<Self> {
        if config.supabase_anon_key.trim().is_empty() {
            return Err(StoreError::InvalidConfiguration(
                "Supabase anon key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            rest_url: config.rest_url(),
            anon_key: config.supabase_anon_key.clone(),
            client: Client::builder().build()?,
        })
    }

    fn request(&self, method: Method, table: &str, access_token: Option<&str>) -> RequestBuilder {
        let bearer = access_token.unwrap_or(&self.anon_key);
        self.client
            .request(method, format!("{}/{table}", self.rest_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        access_token: Option<&str>,
        query: &[(String, String)],
    ) -> StoreResult<Vec<T>> {
        let response = self
            .request(Method::GET, table, access_token)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<Vec<T>>().await?)
    }

    async fn insert_row<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        access_token: Option<&str>,
        body: &B,
    ) -> StoreResult<T> {
        let response = self
            .request(Method::POST, table, access_token)
            .header(ACCEPT, SINGLE_OBJECT_MEDIA_TYPE)
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn insert_row_minimal<B: Serialize + Sync>(
        &self,
        table: &str,
        access_token: Option<&str>,
        body: &B,
    ) -> StoreResult<()> {
        let response = self
            .request(Method::POST, table, access_token)
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn patch_rows<B: Serialize + Sync>(
        &self,
        table: &str,
        access_token: Option<&str>,
        query: &[(String, String)],
        body: &B,
    ) -> StoreResult<()> {
        let response = self
            .request(Method::PATCH, table, access_token)
            .header("Prefer", "return=minimal")
            .query(query)
            .json(body)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// [`ReminderStore`] bound to one signed-in user's access token
#[derive(Clone)]
pub struct PostgrestReminderStore {
    client: PostgrestClient,
    access_token: String,
}

impl PostgrestReminderStore {
    pub fn new(client: PostgrestClient, access_token: impl Into<String>) -> Self {
        Self {
            client,
            access_token: access_token.into(),
        }
    }
}

impl ReminderStore for PostgrestReminderStore {
    async fn list(&self, filter: &ReminderFilter) -> StoreResult<Vec<Reminder>> {
        tracing::debug!(?filter, "Fetching reminders");
        self.client
            .fetch_rows(
                REMINDERS_TABLE,
                Some(&self.access_token),
                &list_query(filter),
            )
            .await
    }

    async fn insert(&self, reminder: &NewReminder) -> StoreResult<Reminder> {
        self.client
            .insert_row(REMINDERS_TABLE, Some(&self.access_token), reminder)
            .await
    }

    async fn update(&self, id: &ReminderId, patch: &ReminderPatch) -> StoreResult<()> {
        self.client
            .patch_rows(
                REMINDERS_TABLE,
                Some(&self.access_token),
                &[("id".to_string(), eq_value(id))],
                patch,
            )
            .await
    }

    async fn update_many(&self, ids: &[ReminderId], patch: &ReminderPatch) -> StoreResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        self.client
            .patch_rows(
                REMINDERS_TABLE,
                Some(&self.access_token),
                &[("id".to_string(), in_values(ids))],
                patch,
            )
            .await
    }
}

impl ProfileStore for PostgrestClient {
    async fn fetch_profile(
        &self,
        access_token: Option<&str>,
        user_id: &str,
    ) -> StoreResult<Option<Profile>> {
        let query = [
            ("select".to_string(), "*".to_string()),
            ("id".to_string(), eq_value(user_id)),
        ];
        let rows: Vec<Profile> = self
            .fetch_rows(PROFILE_TABLE, access_token, &query)
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_profile(
        &self,
        access_token: Option<&str>,
        profile: &Profile,
    ) -> StoreResult<()> {
        self.insert_row_minimal(PROFILE_TABLE, access_token, profile)
            .await
    }

    async fn update_username(
        &self,
        access_token: Option<&str>,
        user_id: &str,
        username: &str,
    ) -> StoreResult<()> {
        self.patch_rows(
            PROFILE_TABLE,
            access_token,
            &[("id".to_string(), eq_value(user_id))],
            &serde_json::json!({ "username": username }),
        )
        .await
    }
}

async fn ensure_success(response: Response) -> StoreResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Api(parse_api_error(status, &body)))
}

fn eq_value(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

fn in_values(ids: &[ReminderId]) -> String {
    let joined = ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({joined})")
}

/// Query-string pairs for a filtered, ordered reminder listing
fn list_query(filter: &ReminderFilter) -> Vec<(String, String)> {
    let mut query = vec![("select".to_string(), "*".to_string())];
    if let Some(is_completed) = filter.is_completed {
        query.push(("is_completed".to_string(), eq_value(is_completed)));
    }
    query.push(("is_deleted".to_string(), eq_value(filter.is_deleted)));
    if let Some(id) = filter.id {
        query.push(("id".to_string(), eq_value(id)));
    }
    query.push(("order".to_string(), "due_date_time.asc".to_string()));
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(query: &[(String, String)]) -> Vec<(&str, &str)> {
        query
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }

    #[test]
    fn active_query_filters_and_orders() {
        let query = list_query(&ReminderFilter::active());
        assert_eq!(
            pairs(&query),
            vec![
                ("select", "*"),
                ("is_completed", "eq.false"),
                ("is_deleted", "eq.false"),
                ("order", "due_date_time.asc"),
            ]
        );
    }

    #[test]
    fn delete_picker_query_skips_completion_filter() {
        let query = list_query(&ReminderFilter::not_deleted());
        assert!(query.iter().all(|(key, _)| key != "is_completed"));
        assert!(query
            .iter()
            .any(|(key, value)| key == "is_deleted" && value == "eq.false"));
    }

    #[test]
    fn by_id_query_includes_id() {
        let id: ReminderId = "0b7f4c1e-8d52-4b6a-9a43-3f0c2f1f6f10".parse().unwrap();
        let query = list_query(&ReminderFilter::by_id(id));
        assert!(query
            .iter()
            .any(|(key, value)| key == "id" && value == "eq.0b7f4c1e-8d52-4b6a-9a43-3f0c2f1f6f10"));
    }

    #[test]
    fn in_values_joins_ids() {
        let a: ReminderId = "00000000-0000-4000-8000-000000000001".parse().unwrap();
        let b: ReminderId = "00000000-0000-4000-8000-000000000002".parse().unwrap();
        assert_eq!(
            in_values(&[a, b]),
            "in.(00000000-0000-4000-8000-000000000001,00000000-0000-4000-8000-000000000002)"
        );
    }

    #[test]
    fn client_builds_rest_url_from_config() {
        let config = ClientConfig::new("https://demo.supabase.co/", "anon").unwrap();
        let client = PostgrestClient::new(&config).unwrap();
        assert_eq!(client.rest_url, "https://demo.supabase.co/rest/v1");
    }

    #[tokio::test]
    async fn update_many_with_no_ids_skips_request() {
        let config = ClientConfig::new("http://127.0.0.1:9", "anon").unwrap();
        let store = PostgrestReminderStore::new(PostgrestClient::new(&config).unwrap(), "token");
        store
            .update_many(&[], &ReminderPatch::deleted())
            .await
            .unwrap();
    }
}
