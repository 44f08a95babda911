//! Live adapter for the `Directory` port using Microsoft Graph v1.0.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::status_error;
use crate::error::PortError;
use crate::model::{DirectoryMember, DirectoryUser, GroupRef, MemberType};
use crate::ports::{Directory, PortFuture};

const GRAPH_API_URL: &str = "https://graph.microsoft.com/v1.0";
const GROUP_FIELDS: &str = "id,displayName";
const USER_FIELDS: &str =
    "id,displayName,userPrincipalName,mail,jobTitle,department,accountEnabled";

/// Live directory backed by Microsoft Graph with a pre-acquired bearer token.
pub struct LiveDirectory {
    client: Client,
    base_url: String,
    token: String,
}

impl LiveDirectory {
    /// Creates a directory client for the public Graph endpoint.
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, GRAPH_API_URL)
    }

    /// Creates a directory client for another Graph deployment.
    #[must_use]
    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, PortError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(|e| PortError::Network(format!("Graph request to {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PortError::Network(format!("Failed to read Graph response: {e}")))?;
        if !status.is_success() {
            let message = serde_json::from_str::<GraphError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(status_error(status, &message, &format!("GET {url}")));
        }
        serde_json::from_str(&body)
            .map_err(|e| PortError::Malformed(format!("Failed to parse Graph response: {e}")))
    }

    /// Fetches every page of a collection, following `@odata.nextLink`.
    async fn get_all<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, PortError> {
        let mut items = Vec::new();
        let mut page: Page<T> = self.get_json(&url, query).await?;
        loop {
            items.append(&mut page.value);
            match page.next_link.take() {
                Some(next) => page = self.get_json(&next, &[]).await?,
                None => return Ok(items),
            }
        }
    }
}

/// One page of a Graph collection.
#[derive(Deserialize)]
struct Page<T> {
    value: Vec<T>,
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}

/// Group as returned by Graph.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphGroup {
    id: String,
    display_name: Option<String>,
}

impl From<GraphGroup> for GroupRef {
    fn from(group: GraphGroup) -> Self {
        Self { id: group.id, display_name: group.display_name.unwrap_or_default() }
    }
}

/// Directory object as returned by a member listing.
#[derive(Deserialize)]
struct GraphMember {
    id: String,
    #[serde(rename = "@odata.type", default)]
    odata_type: String,
}

/// User as returned by Graph.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphUser {
    id: String,
    display_name: Option<String>,
    user_principal_name: Option<String>,
    mail: Option<String>,
    job_title: Option<String>,
    department: Option<String>,
    account_enabled: Option<bool>,
}

/// Error envelope returned by Graph.
#[derive(Deserialize)]
struct GraphError {
    error: GraphErrorDetail,
}

/// Detail inside a Graph error envelope.
#[derive(Deserialize)]
struct GraphErrorDetail {
    message: String,
}

/// Maps an `@odata.type` tag to a member type.
fn member_type(odata_type: &str) -> MemberType {
    match odata_type.trim_start_matches("#microsoft.graph.") {
        "user" => MemberType::User,
        "group" => MemberType::Group,
        other => MemberType::Other(other.to_string()),
    }
}

/// Quotes a value for an OData string literal.
fn odata_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

impl Directory for LiveDirectory {
    fn connect(&self) -> PortFuture<'_, ()> {
        Box::pin(async move {
            let url = format!("{}/organization", self.base_url);
            let _: Page<serde_json::Value> =
                self.get_json(&url, &[("$select", "id".to_string())]).await?;
            Ok(())
        })
    }

    fn resolve_group(&self, id: &str) -> PortFuture<'_, GroupRef> {
        let url = format!("{}/groups/{id}", self.base_url);
        Box::pin(async move {
            let group: GraphGroup =
                self.get_json(&url, &[("$select", GROUP_FIELDS.to_string())]).await?;
            Ok(group.into())
        })
    }

    fn find_groups_by_display_name(&self, name: &str) -> PortFuture<'_, Vec<GroupRef>> {
        let filter = format!("displayName eq {}", odata_literal(name));
        Box::pin(async move {
            let url = format!("{}/groups", self.base_url);
            let query = [("$filter", filter), ("$select", GROUP_FIELDS.to_string())];
            let groups: Vec<GraphGroup> = self.get_all(url, &query).await?;
            Ok(groups.into_iter().map(GroupRef::from).collect())
        })
    }

    fn list_all_groups(&self) -> PortFuture<'_, Vec<GroupRef>> {
        Box::pin(async move {
            let url = format!("{}/groups", self.base_url);
            let query = [("$select", GROUP_FIELDS.to_string()), ("$top", "999".to_string())];
            let groups: Vec<GraphGroup> = self.get_all(url, &query).await?;
            Ok(groups.into_iter().map(GroupRef::from).collect())
        })
    }

    fn list_group_members(&self, group_id: &str) -> PortFuture<'_, Vec<DirectoryMember>> {
        let url = format!("{}/groups/{group_id}/members", self.base_url);
        Box::pin(async move {
            let members: Vec<GraphMember> =
                self.get_all(url, &[("$select", "id".to_string())]).await?;
            Ok(members
                .into_iter()
                .map(|m| DirectoryMember { member_type: member_type(&m.odata_type), id: m.id })
                .collect())
        })
    }

    fn resolve_user(&self, id: &str) -> PortFuture<'_, DirectoryUser> {
        let url = format!("{}/users/{id}", self.base_url);
        Box::pin(async move {
            let user: GraphUser =
                self.get_json(&url, &[("$select", USER_FIELDS.to_string())]).await?;
            Ok(DirectoryUser {
                display_name: user.display_name.unwrap_or_default(),
                id: user.id,
                user_principal_name: user.user_principal_name,
                mail: user.mail,
                job_title: user.job_title,
                department: user.department,
                account_enabled: user.account_enabled,
            })
        })
    }
}
