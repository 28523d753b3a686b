//! The demo widgets: one static source and three public APIs.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use autocomplete_lib::config::{OnError, OnSelect};
use autocomplete_lib::fetch::HttpFetcher;
use autocomplete_lib::{ConfigError, RemoteSource, ResolveError, ResultItem, WidgetConfig};
use serde::Deserialize;
use serde_json::Value;

use crate::states;

const USER_AGENT: &str = concat!("autocomplete-cli/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Which demo widget to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    /// US states, filtered locally.
    States,
    /// GitHub users by login.
    GithubUsers,
    /// Open Brewery DB breweries.
    Breweries,
    /// NASA image library titles.
    NasaImages,
}

impl Demo {
    /// All demos, in menu order.
    pub const ALL: [Demo; 4] = [Demo::States, Demo::GithubUsers, Demo::Breweries, Demo::NasaImages];

    /// Short name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Demo::States => "states",
            Demo::GithubUsers => "github",
            Demo::Breweries => "breweries",
            Demo::NasaImages => "nasa",
        }
    }

    /// Builds the widget configuration for this demo.
    pub fn config(self, on_select: OnSelect, on_error: OnError) -> Result<WidgetConfig, ConfigError> {
        let builder = WidgetConfig::builder()
            .on_select(move |value| on_select(value))
            .on_error(move |err| on_error(err));

        match self {
            Demo::States => builder.local_data(states::items()).build(),
            Demo::GithubUsers => builder
                .remote(
                    RemoteSource::new("https://api.github.com/search/users", "q=", github_users)
                        .query_trailer("+in:login")
                        .page_size_param("&per_page=")
                        .fetcher(fetcher()),
                )
                .build(),
            Demo::Breweries => builder
                .remote(
                    RemoteSource::new(
                        "https://api.openbrewerydb.org/v1/breweries/autocomplete",
                        "query=",
                        breweries,
                    )
                    .page_size_param("&per_page=")
                    .fetcher(fetcher()),
                )
                .build(),
            // The NASA API has no page size parameter.
            Demo::NasaImages => builder
                .remote(
                    RemoteSource::new("https://images-api.nasa.gov/search", "title=", nasa_images)
                        .query_trailer("&media_type=image")
                        .fetcher(fetcher()),
                )
                .build(),
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Demo::ALL
            .into_iter()
            .find(|demo| demo.name() == s)
            .ok_or_else(|| format!("unknown demo {s:?}"))
    }
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
}

// =============================================================================
// Response adapters
// =============================================================================

/// `GET /search/users` response.
#[derive(Debug, Deserialize)]
struct GithubSearch {
    items: Vec<GithubUser>,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
    avatar_url: Option<String>,
}

fn github_users(raw: Value) -> Result<Vec<ResultItem>, ResolveError> {
    let search: GithubSearch = serde_json::from_value(raw)?;
    Ok(search
        .items
        .into_iter()
        .map(|user| {
            let item = ResultItem::new(user.login.clone(), user.login);
            match user.avatar_url {
                Some(url) => item.with_image(url),
                None => item,
            }
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct Brewery {
    id: String,
    name: String,
}

fn breweries(raw: Value) -> Result<Vec<ResultItem>, ResolveError> {
    let breweries: Vec<Brewery> = serde_json::from_value(raw)?;
    Ok(breweries
        .into_iter()
        .map(|brewery| ResultItem::new(brewery.name, brewery.id))
        .collect())
}

#[derive(Debug, Deserialize)]
struct NasaSearch {
    collection: NasaCollection,
}

#[derive(Debug, Deserialize)]
struct NasaCollection {
    items: Vec<NasaItem>,
}

#[derive(Debug, Deserialize)]
struct NasaItem {
    data: Vec<NasaData>,
    #[serde(default)]
    links: Vec<NasaLink>,
}

#[derive(Debug, Deserialize)]
struct NasaData {
    title: String,
    nasa_id: String,
}

#[derive(Debug, Deserialize)]
struct NasaLink {
    href: String,
}

fn nasa_images(raw: Value) -> Result<Vec<ResultItem>, ResolveError> {
    let search: NasaSearch = serde_json::from_value(raw)?;
    Ok(search
        .collection
        .items
        .into_iter()
        .filter_map(|item| {
            let data = item.data.into_iter().next()?;
            let result = ResultItem::new(data.title, data.nasa_id);
            Some(match item.links.into_iter().next() {
                Some(link) => result.with_image(link.href),
                None => result,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    #[test]
    fn test_github_adapter() {
        let raw = json!({
            "total_count": 2,
            "items": [
                { "login": "octocat", "id": 1, "avatar_url": "https://avatars/1" },
                { "login": "octodog", "id": 2 }
            ]
        });
        let items = github_users(raw).unwrap();
        assert_eq!(
            items,
            vec![
                ResultItem::new("octocat", "octocat").with_image("https://avatars/1"),
                ResultItem::new("octodog", "octodog"),
            ]
        );
    }

    #[test]
    fn test_github_adapter_rejects_error_payload() {
        let raw = json!({ "message": "API rate limit exceeded" });
        assert!(matches!(github_users(raw), Err(ResolveError::Parse { .. })));
    }

    #[test]
    fn test_breweries_adapter() {
        let raw = json!([{ "id": "b-1", "name": "Running Dogs Brewery" }]);
        let items = breweries(raw).unwrap();
        assert_eq!(items, vec![ResultItem::new("Running Dogs Brewery", "b-1")]);
    }

    #[test]
    fn test_nasa_adapter_skips_items_without_data() {
        let raw = json!({
            "collection": {
                "items": [
                    {
                        "data": [{ "title": "Moon Landing", "nasa_id": "as11" }],
                        "links": [{ "href": "https://images/as11.jpg" }]
                    },
                    { "data": [] },
                    { "data": [{ "title": "Moon Rock", "nasa_id": "rock" }] }
                ]
            }
        });
        let items = nasa_images(raw).unwrap();
        assert_eq!(
            items,
            vec![
                ResultItem::new("Moon Landing", "as11").with_image("https://images/as11.jpg"),
                ResultItem::new("Moon Rock", "rock"),
            ]
        );
    }

    #[test]
    fn test_demo_names_round_trip() {
        for demo in Demo::ALL {
            assert_eq!(demo.name().parse::<Demo>(), Ok(demo));
        }
        assert!("yelp".parse::<Demo>().is_err());
    }

    #[test]
    fn test_all_demo_configs_are_valid() {
        for demo in Demo::ALL {
            let config = demo.config(Arc::new(|_: &Value| {}), Arc::new(|_: &ResolveError| {}));
            assert!(config.is_ok(), "{demo} config rejected");
        }
    }
}
