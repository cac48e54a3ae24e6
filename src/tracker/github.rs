use crate::model::{Repository, Result, State, VelocityError};
use crate::tracker::{Issue, IssueTracker, Label, Milestone, MilestoneState};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

const PER_PAGE: usize = 100;
const AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// GitHub REST v3 client bound to one access token.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    base_url: Url,
}

impl GithubClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| VelocityError::Config("'GITHUB_TOKEN' is not a valid header value".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(AGENT));

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    fn endpoint(&self, repo: &Repository, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                VelocityError::Config(format!("`{}` cannot be an API base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(["repos", repo.owner.as_str(), repo.name.as_str()])
            .extend(segments);
        Ok(url)
    }

    async fn get_one<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn get_pages<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut page = 1;
        let mut items = Vec::new();
        loop {
            let response = self
                .client
                .get(url.clone())
                .query(query)
                .query(&[("per_page", PER_PAGE.to_string()), ("page", page.to_string())])
                .send()
                .await?
                .error_for_status()?;
            let batch: Vec<T> = response.json().await?;
            let fetched = batch.len();
            debug!(url = %url, page, fetched, "fetched page");

            items.extend(batch);
            if fetched < PER_PAGE {
                break;
            }
            page += 1;
        }
        Ok(items)
    }
}

impl IssueTracker for GithubClient {
    async fn milestones(&self, repo: &Repository, state: MilestoneState) -> Result<Vec<Milestone>> {
        let url = self.endpoint(repo, &["milestones"])?;
        self.get_pages(url, &[("state", state.as_str())]).await
    }

    async fn milestone(&self, repo: &Repository, number: u64) -> Result<Milestone> {
        let number = number.to_string();
        let url = self.endpoint(repo, &["milestones", number.as_str()])?;
        self.get_one(url).await
    }

    // The issues endpoint also returns pull requests; they carry point labels
    // the same way and are counted alongside issues.
    async fn issues(&self, repo: &Repository, state: State, label: &Label) -> Result<Vec<Issue>> {
        let url = self.endpoint(repo, &["issues"])?;
        self.get_pages(url, &[("state", state.as_str()), ("labels", label.name.as_str())])
            .await
    }

    async fn label(&self, repo: &Repository, name: &str) -> Result<Label> {
        let url = self.endpoint(repo, &["labels", name])?;
        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(VelocityError::LabelNotFound {
                repo: repo.to_string(),
                name: name.to_string(),
            });
        }
        Ok(response.error_for_status()?.json().await?)
    }
}
