//! Network configuration through `networksetup` and `ifconfig`.

pub mod parse;

use std::sync::Arc;

use async_trait::async_trait;
use hostfacts_core::derive::text::keyed_token;
use hostfacts_core::domain::HardwarePort;
use hostfacts_core::ports::command_runner::command_line;
use hostfacts_core::ports::{CommandRunner, NetworkConfig, NetworkError};

const NETWORKSETUP: &str = "networksetup";

/// `NetworkConfig` implemented by scraping the system network tools.
#[derive(Clone)]
pub struct NetworksetupConfig {
    commands: Arc<dyn CommandRunner>,
}

impl NetworksetupConfig {
    pub fn new(commands: Arc<dyn CommandRunner>) -> Self {
        Self { commands }
    }

    async fn report(&self, program: &str, args: &[&str]) -> Result<String, NetworkError> {
        self.commands
            .run(program, args)
            .await
            .and_then(|output| output.into_text(&command_line(program, args)))
            .map_err(|e| NetworkError::Query(e.to_string()))
    }
}

#[async_trait]
impl NetworkConfig for NetworksetupConfig {
    async fn network_services(&self) -> Result<Vec<String>, NetworkError> {
        let report = self
            .report(NETWORKSETUP, &["-listallnetworkservices"])
            .await?;
        Ok(parse::network_services(&report))
    }

    async fn hardware_ports(&self) -> Result<Vec<HardwarePort>, NetworkError> {
        let report = self
            .report(NETWORKSETUP, &["-listallhardwareports"])
            .await?;
        Ok(parse::hardware_ports(&report))
    }

    async fn wireless_interfaces(&self) -> Result<Vec<String>, NetworkError> {
        let ports = self.hardware_ports().await?;
        Ok(parse::wireless_devices(&ports))
    }

    async fn hardware_address(&self, device: &str) -> Result<Option<String>, NetworkError> {
        let report = self.report("ifconfig", &[device]).await?;
        Ok(keyed_token(&report, "ether"))
    }

    async fn wifi_power(&self, device: &str) -> Result<bool, NetworkError> {
        let report = self
            .report(NETWORKSETUP, &["-getairportpower", device])
            .await?;
        parse::airport_power(&report)
            .ok_or_else(|| NetworkError::Parse(format!("airport power for {device}: {}", report.trim())))
    }

    async fn current_network(&self, device: &str) -> Result<Option<String>, NetworkError> {
        let report = self
            .report(NETWORKSETUP, &["-getairportnetwork", device])
            .await?;
        Ok(parse::airport_network(&report))
    }
}
