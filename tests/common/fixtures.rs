//! Config snippets shared by the CLI tests

/// Two deploy entries, default restart
pub const DEPLOY_CONFIG: &str = r#"
[server]
host = "203.0.113.7"
user = "deploy"

[app]
path = "/srv/app"
pm2_name = "shop"
verify_url = "https://shop.example.com"

[deploy]
files = [
  { local = "server.js", remote_dir = "." },
  { local = "public/app.js", remote_dir = "public" },
  { local = "views/index.html", remote_dir = "/srv/app/views" },
]
"#;

/// Helpers only, no deploy list
pub const HELPER_CONFIG: &str = r#"
[server]
host = "203.0.113.7"

[app]
path = "/srv/app"
node_bin = "/opt/node/bin/node"
pm2_name = "shop"

[database]
name = "shop"
user = "shop_user"
"#;

/// Local files referenced by `DEPLOY_CONFIG`
pub const DEPLOY_FILES: &[&str] = &["server.js", "public/app.js", "views/index.html"];
