pub mod github_client;
