use clap::ValueEnum;
use std::fmt;
use url::Url;

/// Storage servers the tools are allowed to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Endpoint {
    #[default]
    #[value(name = "airlab-share-01.andrew.cmu.edu:9000")]
    Share01,
    #[value(name = "airlab-share-02.andrew.cmu.edu:9000")]
    Share02,
}

impl Endpoint {
    pub fn host_port(self) -> &'static str {
        match self {
            Endpoint::Share01 => "airlab-share-01.andrew.cmu.edu:9000",
            Endpoint::Share02 => "airlab-share-02.andrew.cmu.edu:9000",
        }
    }

    pub fn url(self) -> Result<Url, url::ParseError> {
        Url::parse(&format!("https://{}", self.host_port()))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_port())
    }
}
