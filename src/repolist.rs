use serde::Deserialize;

use crate::totals::RawTotals;

/// One page of `GET /users/{user}/repos`.
#[derive(Deserialize, PartialEq, Eq, Debug)]
#[serde(untagged)]
pub enum ListingResponse {
    Repos(Vec<RepoDescriptor>),
    Error(ApiError),
}

/// Body of `GET {languages_url}`.
#[derive(Deserialize, PartialEq, Eq, Debug)]
#[serde(untagged)]
pub enum LanguagesResponse {
    Languages(RawTotals),
    Error(ApiError),
}

#[derive(Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct RepoDescriptor {
    pub full_name: String,
    pub languages_url: String,
}

#[derive(Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct ApiError {
    pub message: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
}

#[test]
fn test() {
    let json = serde_json::from_str::<ListingResponse>(
        r#"
[
  {
    "id": 1296269,
    "name": "Hello-World",
    "full_name": "octocat/Hello-World",
    "private": false,
    "languages_url": "https://api.github.com/repos/octocat/Hello-World/languages",
    "language": "C"
  },
  {
    "id": 1300192,
    "name": "Spoon-Knife",
    "full_name": "octocat/Spoon-Knife",
    "private": false,
    "languages_url": "https://api.github.com/repos/octocat/Spoon-Knife/languages",
    "language": null
  }
]
"#,
    )
    .unwrap();
    assert_eq!(
        json,
        ListingResponse::Repos(vec![
            RepoDescriptor {
                full_name: "octocat/Hello-World".to_string(),
                languages_url: "https://api.github.com/repos/octocat/Hello-World/languages"
                    .to_string(),
            },
            RepoDescriptor {
                full_name: "octocat/Spoon-Knife".to_string(),
                languages_url: "https://api.github.com/repos/octocat/Spoon-Knife/languages"
                    .to_string(),
            },
        ])
    )
}

#[test]
fn error_object() {
    let json = serde_json::from_str::<ListingResponse>(
        r#"{"message": "Not Found", "documentation_url": "https://docs.github.com/rest"}"#,
    )
    .unwrap();
    assert_eq!(
        json,
        ListingResponse::Error(ApiError {
            message: "Not Found".to_string(),
            documentation_url: Some("https://docs.github.com/rest".to_string()),
        })
    )
}

#[test]
fn empty_page() {
    let json = serde_json::from_str::<ListingResponse>("[]").unwrap();
    assert_eq!(json, ListingResponse::Repos(vec![]));
}

#[test]
fn languages() {
    let json =
        serde_json::from_str::<LanguagesResponse>(r#"{"Rust": 4200, "Shell": 17}"#).unwrap();
    let LanguagesResponse::Languages(totals) = json else {
        panic!("expected language map");
    };
    assert_eq!(totals.get("Rust"), Some(4200));
    assert_eq!(totals.get("Shell"), Some(17));

    let json = serde_json::from_str::<LanguagesResponse>(r#"{"message": "Moved"}"#).unwrap();
    assert!(matches!(json, LanguagesResponse::Error(e) if e.message == "Moved"));
}
