use std::fmt;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Http => f.write_str("http"),
            Protocol::Https => f.write_str("https"),
        }
    }
}

/// Location of one game session on the server.
///
/// The session base URL is `{protocol}://{host}:{port}{api_path}{session_id}`;
/// `api_path` is joined verbatim, so it normally starts and ends with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
    pub api_path: String,
    pub session_id: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            protocol: Protocol::Https,
            host: "tetris-server.example.com".to_owned(),
            port: 3001,
            api_path: "/api/tetris/".to_owned(),
            session_id: "my-bot-session".to_owned(),
        }
    }
}

impl Endpoint {
    #[must_use]
    pub fn origin(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}{}{}", self.origin(), self.api_path, self.session_id)
    }

    #[must_use]
    pub fn status_url(&self) -> String {
        format!("{}/status", self.base_url())
    }

    #[must_use]
    pub fn matrix_url(&self) -> String {
        format!("{}/matrix", self.base_url())
    }

    /// URL of the command endpoint, without the `command` query parameter.
    #[must_use]
    pub fn command_url(&self) -> String {
        format!("{}/command", self.base_url())
    }

    /// URLs tried by the connectivity probe, in order.
    ///
    /// 1. the session base URL
    /// 2. the base URL with a `/tetris/` segment collapsed to `/`
    /// 3. the `/api` root, when the base URL contains `/api/`
    #[must_use]
    pub fn probe_urls(&self) -> Vec<String> {
        let base = self.base_url();
        let mut urls = vec![base.clone(), base.replace("/tetris/", "/")];
        if let Some((root, _)) = base.split_once("/api/") {
            urls.push(format!("{root}/api"));
        }
        urls
    }
}
