//! In-memory fakes for every port.
//!
//! Available to this crate's unit tests and, through the `test-utils`
//! feature, to downstream crates. `FakeHost` assembles them into a
//! `HostServices`; any port left unset answers as an empty host would.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{HardwarePort, Structured};
use crate::ports::command_runner::command_line;
use crate::ports::{
    CommandError, CommandOutput, CommandRunner, DecodeError, DisplayError, DisplayProbe,
    HostEnvironment, HostError, HostServices, HttpClient, HttpError, NetworkConfig, NetworkError,
    PlistDecoder, PreferenceError, PreferenceStore,
};
use crate::resolvers::FactContext;
use crate::session::SessionState;
use crate::settings::Settings;

/// Command runner answering from a table keyed by the full command line.
///
/// Unscripted commands fail to spawn. Clones share the call log.
#[derive(Clone, Default)]
pub struct ScriptedCommands {
    responses: Arc<HashMap<String, CommandOutput>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedCommands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `line` with `output`.
    #[must_use]
    pub fn respond(mut self, line: &str, output: CommandOutput) -> Self {
        Arc::make_mut(&mut self.responses).insert(line.to_string(), output);
        self
    }

    /// Answer `line` with a clean exit and `stdout`.
    #[must_use]
    pub fn ok(self, line: &str, stdout: &str) -> Self {
        self.respond(line, CommandOutput::success(stdout))
    }

    /// Command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn was_run(&self, line: &str) -> bool {
        self.calls().iter().any(|call| call == line)
    }
}

#[async_trait]
impl CommandRunner for ScriptedCommands {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        let line = command_line(program, args);
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.clone());
        self.responses
            .get(&line)
            .cloned()
            .ok_or_else(|| CommandError::Spawn {
                program: program.to_string(),
                message: format!("no scripted response for '{line}'"),
            })
    }
}

/// Decoder mapping exact payloads to prepared trees.
#[derive(Clone, Default)]
pub struct KeyedDecoder {
    trees: HashMap<Vec<u8>, Structured>,
}

impl KeyedDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entry(mut self, payload: &str, tree: Structured) -> Self {
        self.trees.insert(payload.as_bytes().to_vec(), tree);
        self
    }
}

impl PlistDecoder for KeyedDecoder {
    fn decode(&self, payload: &[u8]) -> Result<Structured, DecodeError> {
        if payload.is_empty() {
            return Err(DecodeError::Empty);
        }
        self.trees.get(payload).cloned().ok_or_else(|| {
            DecodeError::Malformed(format!(
                "unknown payload '{}'",
                String::from_utf8_lossy(payload)
            ))
        })
    }
}

/// Preference store backed by a `(domain, key)` table.
#[derive(Clone, Default)]
pub struct StaticPreferences {
    values: HashMap<(String, String), String>,
}

impl StaticPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set(mut self, domain: &str, key: &str, value: &str) -> Self {
        self.values
            .insert((domain.to_string(), key.to_string()), value.to_string());
        self
    }
}

#[async_trait]
impl PreferenceStore for StaticPreferences {
    async fn read(&self, domain: &str, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self
            .values
            .get(&(domain.to_string(), key.to_string()))
            .cloned())
    }
}

/// Network configuration with a fixed set of services and ports.
#[derive(Clone, Default)]
pub struct StaticNetwork {
    services: Vec<String>,
    ports: Vec<HardwarePort>,
    wireless: Vec<String>,
    power: HashMap<String, bool>,
    associations: HashMap<String, String>,
}

impl StaticNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn service(mut self, name: &str) -> Self {
        self.services.push(name.to_string());
        self
    }

    #[must_use]
    pub fn port(mut self, name: &str, device: &str, hardware_address: &str) -> Self {
        self.ports
            .push(HardwarePort::new(name, device, hardware_address));
        self
    }

    #[must_use]
    pub fn wireless(mut self, device: &str) -> Self {
        self.wireless.push(device.to_string());
        self
    }

    #[must_use]
    pub fn powered(mut self, device: &str, on: bool) -> Self {
        self.power.insert(device.to_string(), on);
        self
    }

    #[must_use]
    pub fn associated(mut self, device: &str, network: &str) -> Self {
        self.associations
            .insert(device.to_string(), network.to_string());
        self
    }
}

#[async_trait]
impl NetworkConfig for StaticNetwork {
    async fn network_services(&self) -> Result<Vec<String>, NetworkError> {
        Ok(self.services.clone())
    }

    async fn hardware_ports(&self) -> Result<Vec<HardwarePort>, NetworkError> {
        Ok(self.ports.clone())
    }

    async fn wireless_interfaces(&self) -> Result<Vec<String>, NetworkError> {
        Ok(self.wireless.clone())
    }

    async fn hardware_address(&self, device: &str) -> Result<Option<String>, NetworkError> {
        Ok(self
            .ports
            .iter()
            .find(|port| port.device == device)
            .map(|port| port.hardware_address.clone()))
    }

    async fn wifi_power(&self, device: &str) -> Result<bool, NetworkError> {
        self.power
            .get(device)
            .copied()
            .ok_or_else(|| NetworkError::Query(format!("{device} is not a wireless device")))
    }

    async fn current_network(&self, device: &str) -> Result<Option<String>, NetworkError> {
        Ok(self.associations.get(device).cloned())
    }
}

/// Display probe with a fixed answer.
#[derive(Clone, Default)]
pub struct StaticDisplay {
    size: Option<(i64, i64)>,
}

impl StaticDisplay {
    pub const fn new(size: Option<(i64, i64)>) -> Self {
        Self { size }
    }
}

#[async_trait]
impl DisplayProbe for StaticDisplay {
    async fn main_display_size(&self) -> Result<Option<(i64, i64)>, DisplayError> {
        Ok(self.size)
    }
}

/// HTTP client answering from a URL table. Unknown URLs are unreachable.
#[derive(Clone, Default)]
pub struct StaticHttp {
    bodies: HashMap<String, Value>,
}

impl StaticHttp {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn body(mut self, url: &str, body: Value) -> Self {
        self.bodies.insert(url.to_string(), body);
        self
    }
}

#[async_trait]
impl HttpClient for StaticHttp {
    async fn get_json(&self, url: &str) -> Result<Value, HttpError> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| HttpError::Transport(format!("no route to {url}")))
    }
}

/// Host environment with fixed identity and clock values.
#[derive(Clone)]
pub struct StaticHost {
    vars: HashMap<String, String>,
    hostname: String,
    current_dir: String,
    uid: u32,
    gid: u32,
    effective_uid: u32,
    boot_time_secs: u64,
    uptime_secs: u64,
}

impl Default for StaticHost {
    fn default() -> Self {
        Self {
            vars: HashMap::new(),
            hostname: "testhost".to_string(),
            current_dir: "/".to_string(),
            uid: 501,
            gid: 20,
            effective_uid: 501,
            boot_time_secs: 1_700_000_000,
            uptime_secs: 3_600,
        }
    }
}

impl StaticHost {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn hostname(mut self, hostname: &str) -> Self {
        self.hostname = hostname.to_string();
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: &str) -> Self {
        self.current_dir = dir.to_string();
        self
    }

    #[must_use]
    pub const fn ids(mut self, uid: u32, gid: u32, effective_uid: u32) -> Self {
        self.uid = uid;
        self.gid = gid;
        self.effective_uid = effective_uid;
        self
    }

    #[must_use]
    pub const fn clock(mut self, boot_time_secs: u64, uptime_secs: u64) -> Self {
        self.boot_time_secs = boot_time_secs;
        self.uptime_secs = uptime_secs;
        self
    }
}

impl HostEnvironment for StaticHost {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn hostname(&self) -> Result<String, HostError> {
        Ok(self.hostname.clone())
    }

    fn current_dir(&self) -> Result<String, HostError> {
        Ok(self.current_dir.clone())
    }

    fn uid(&self) -> Result<u32, HostError> {
        Ok(self.uid)
    }

    fn gid(&self) -> Result<u32, HostError> {
        Ok(self.gid)
    }

    fn effective_uid(&self) -> Result<u32, HostError> {
        Ok(self.effective_uid)
    }

    fn uptime_secs(&self) -> u64 {
        self.uptime_secs
    }

    fn boot_time_secs(&self) -> u64 {
        self.boot_time_secs
    }
}

/// Builder assembling fakes into `HostServices`.
pub struct FakeHost {
    commands: Arc<dyn CommandRunner>,
    plist: Arc<dyn PlistDecoder>,
    preferences: Arc<dyn PreferenceStore>,
    network: Arc<dyn NetworkConfig>,
    display: Arc<dyn DisplayProbe>,
    http: Arc<dyn HttpClient>,
    host: Arc<dyn HostEnvironment>,
    settings: Settings,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            commands: Arc::new(ScriptedCommands::new()),
            plist: Arc::new(KeyedDecoder::new()),
            preferences: Arc::new(StaticPreferences::new()),
            network: Arc::new(StaticNetwork::new()),
            display: Arc::new(StaticDisplay::default()),
            http: Arc::new(StaticHttp::new()),
            host: Arc::new(StaticHost::new()),
            settings: Settings::with_defaults(),
        }
    }
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(mut self, commands: impl CommandRunner + 'static) -> Self {
        self.commands = Arc::new(commands);
        self
    }

    #[must_use]
    pub fn decoder(mut self, decoder: impl PlistDecoder + 'static) -> Self {
        self.plist = Arc::new(decoder);
        self
    }

    #[must_use]
    pub fn preferences(mut self, preferences: impl PreferenceStore + 'static) -> Self {
        self.preferences = Arc::new(preferences);
        self
    }

    #[must_use]
    pub fn network(mut self, network: impl NetworkConfig + 'static) -> Self {
        self.network = Arc::new(network);
        self
    }

    #[must_use]
    pub fn display(mut self, display: impl DisplayProbe + 'static) -> Self {
        self.display = Arc::new(display);
        self
    }

    #[must_use]
    pub fn http_client(mut self, http: impl HttpClient + 'static) -> Self {
        self.http = Arc::new(http);
        self
    }

    #[must_use]
    pub fn host(mut self, host: impl HostEnvironment + 'static) -> Self {
        self.host = Arc::new(host);
        self
    }

    #[must_use]
    pub fn external_ip_url(mut self, url: &str) -> Self {
        self.settings.external_ip_url = url.to_string();
        self
    }

    /// Settings used by `context`.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn build(&self) -> HostServices {
        HostServices {
            commands: Arc::clone(&self.commands),
            plist: Arc::clone(&self.plist),
            preferences: Arc::clone(&self.preferences),
            network: Arc::clone(&self.network),
            display: Arc::clone(&self.display),
            http: Arc::clone(&self.http),
            host: Arc::clone(&self.host),
        }
    }

    /// Gather a session against the fakes and wrap it in a resolver context.
    pub async fn context(self) -> FactContext {
        let services = self.build();
        let session = SessionState::gather(&services, self.settings.resolver_timeout).await;
        FactContext::new(services, session, self.settings)
    }
}
