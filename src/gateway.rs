use std::str::FromStr;

pub mod events;
pub mod logs;
pub mod factory;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum GatewayPublisherVia {
    Logs,
    Disabled,
}

impl FromStr for GatewayPublisherVia {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logs" | "log" => Ok(GatewayPublisherVia::Logs),
            "disabled" | "none" | "off" => Ok(GatewayPublisherVia::Disabled),
            other => Err(format!("unknown event publisher {}", other)),
        }
    }
}
