//! The fact registry.
//!
//! A closed catalog of named resolvers, validated once at construction,
//! plus the session context they share. The registry holds no mutable
//! state; every lookup recomputes its fact.

use std::collections::BTreeMap;

use futures_util::future::BoxFuture;
use tracing::{debug, instrument, warn};

use crate::domain::FactValue;
use crate::error::{FactResult, RegistryError, ResolveError};
use crate::ports::HostServices;
use crate::resolvers::{self, FactContext};
use crate::session::SessionState;
use crate::settings::Settings;
use crate::snapshot::Snapshot;

/// Signature shared by every registered resolver.
pub type ResolveFn = for<'a> fn(&'a FactContext) -> BoxFuture<'a, FactResult>;

/// Collects resolver registrations before validation.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<(&'static str, ResolveFn)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-populated with the full fact catalog.
    pub fn standard() -> Self {
        let mut builder = Self::new();
        resolvers::register_all(&mut builder);
        builder
    }

    pub fn register(&mut self, name: &'static str, resolver: ResolveFn) -> &mut Self {
        self.entries.push((name, resolver));
        self
    }

    /// Validate names and freeze the catalog.
    pub fn build(self) -> Result<Catalog, RegistryError> {
        let mut resolvers = BTreeMap::new();
        for (name, resolver) in self.entries {
            if !is_valid_name(name) {
                return Err(RegistryError::InvalidName(name.to_string()));
            }
            if resolvers.insert(name, resolver).is_some() {
                return Err(RegistryError::DuplicateName(name.to_string()));
            }
        }
        Ok(Catalog { resolvers })
    }
}

/// Non-empty, lowercase ASCII letters and digits only.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

/// Validated name to resolver table.
pub struct Catalog {
    resolvers: BTreeMap<&'static str, ResolveFn>,
}

impl Catalog {
    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        self.resolvers.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    fn get(&self, name: &str) -> Option<ResolveFn> {
        self.resolvers.get(name).copied()
    }
}

/// Catalog plus the shared context its resolvers run against.
pub struct FactRegistry {
    catalog: Catalog,
    context: FactContext,
}

impl FactRegistry {
    /// Build the standard catalog and gather the session state.
    pub async fn new(services: HostServices, settings: Settings) -> Result<Self, RegistryError> {
        let catalog = RegistryBuilder::standard().build()?;
        Ok(Self::with_catalog(catalog, services, settings).await)
    }

    /// Use a custom catalog (tests, embedding).
    pub async fn with_catalog(catalog: Catalog, services: HostServices, settings: Settings) -> Self {
        let session = SessionState::gather(&services, settings.resolver_timeout).await;
        debug!(facts = catalog.len(), "fact registry ready");
        Self {
            catalog,
            context: FactContext::new(services, session, settings),
        }
    }

    /// Every registered name, sorted. Never invokes a resolver.
    pub fn list_names(&self) -> Vec<&'static str> {
        self.catalog.names()
    }

    /// Resolve one fact.
    ///
    /// An unknown name is `NotFound`; a resolver failure is `Resolve` and
    /// never turns into `NotFound`.
    #[instrument(skip(self))]
    pub async fn resolve(&self, name: &str) -> Result<FactValue, RegistryError> {
        let resolver = self
            .catalog
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        self.invoke(resolver)
            .await
            .map_err(|source| RegistryError::Resolve {
                name: name.to_string(),
                source,
            })
    }

    /// Resolve every fact once, in name order, continuing past failures.
    pub async fn resolve_all(&self) -> Snapshot {
        let mut snapshot = Snapshot::new();
        for (name, resolver) in &self.catalog.resolvers {
            match self.invoke(*resolver).await {
                Ok(value) => snapshot.record_value(*name, value),
                Err(err) => {
                    warn!(fact = name, error = %err, "fact could not be resolved");
                    snapshot.record_failure(*name, err);
                }
            }
        }
        snapshot
    }

    /// The context resolvers run against.
    pub const fn context(&self) -> &FactContext {
        &self.context
    }

    async fn invoke(&self, resolver: ResolveFn) -> FactResult {
        let timeout = self.context.settings.resolver_timeout;
        tokio::time::timeout(timeout, resolver(&self.context))
            .await
            .unwrap_or_else(|_| Err(ResolveError::Timeout(timeout)))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::FakeHost;

    fn fixed(_: &FactContext) -> BoxFuture<'_, FactResult> {
        Box::pin(async { Ok(FactValue::Integer(7)) })
    }

    fn failing(_: &FactContext) -> BoxFuture<'_, FactResult> {
        Box::pin(async { Err(ResolveError::unexpected("probe", "garbled output")) })
    }

    fn hanging(_: &FactContext) -> BoxFuture<'_, FactResult> {
        Box::pin(std::future::pending::<FactResult>())
    }

    async fn registry_with(builder: RegistryBuilder) -> FactRegistry {
        let services = FakeHost::new().build();
        FactRegistry::with_catalog(builder.build().unwrap(), services, Settings::default()).await
    }

    #[test]
    fn duplicate_names_are_rejected_at_build_time() {
        let mut builder = RegistryBuilder::new();
        builder.register("uid", fixed).register("uid", failing);
        assert!(matches!(
            builder.build(),
            Err(RegistryError::DuplicateName(ref name)) if name == "uid"
        ));
    }

    #[test]
    fn invalid_names_are_rejected() {
        for bad in ["", "Hostname", "wifi_power", "ip-address"] {
            let mut builder = RegistryBuilder::new();
            builder.register(bad, fixed);
            assert!(
                matches!(builder.build(), Err(RegistryError::InvalidName(_))),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn standard_catalog_is_valid_and_complete() {
        let catalog = RegistryBuilder::standard().build().unwrap();
        let names = catalog.names();
        assert_eq!(names.len(), 69);
        assert!(names.windows(2).all(|pair| pair[0] < pair[1]));
        for expected in ["hostname", "cidr", "wifiinterface", "remotelogin", "externalip"] {
            assert!(names.contains(&expected), "{expected} missing");
        }
    }

    #[tokio::test]
    async fn list_names_is_sorted_regardless_of_registration_order() {
        let mut builder = RegistryBuilder::new();
        builder
            .register("zeta", fixed)
            .register("alpha", hanging)
            .register("mid", failing);
        let registry = registry_with(builder).await;

        // `alpha` would hang if listing invoked resolvers.
        assert_eq!(registry.list_names(), ["alpha", "mid", "zeta"]);
        assert_eq!(registry.list_names(), registry.list_names());
    }

    #[tokio::test]
    async fn unknown_name_is_not_found() {
        let registry = registry_with(RegistryBuilder::new()).await;
        assert!(matches!(
            registry.resolve("nosuchfact").await,
            Err(RegistryError::NotFound(ref name)) if name == "nosuchfact"
        ));
    }

    #[tokio::test]
    async fn resolver_failure_is_not_reported_as_not_found() {
        let mut builder = RegistryBuilder::new();
        builder.register("probe", failing);
        let registry = registry_with(builder).await;

        let err = registry.resolve("probe").await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Resolve { ref name, source: ResolveError::Unexpected { .. } } if name == "probe"
        ));
    }

    #[tokio::test]
    async fn snapshot_isolates_failures() {
        let mut builder = RegistryBuilder::new();
        builder
            .register("broken", failing)
            .register("answer", fixed);
        let registry = registry_with(builder).await;

        let snapshot = registry.resolve_all().await;
        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.get("answer").and_then(|entry| entry.value()),
            Some(&FactValue::Integer(7))
        );
        assert_eq!(snapshot.failures().len(), 1);
        assert_eq!(snapshot.failures()[0].0, "broken");
    }

    #[tokio::test(start_paused = true)]
    async fn hung_resolver_times_out() {
        let mut builder = RegistryBuilder::new();
        builder.register("stuck", hanging).register("answer", fixed);
        let registry = registry_with(builder).await;

        let err = registry.resolve("stuck").await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Resolve { source: ResolveError::Timeout(timeout), .. }
                if timeout == Duration::from_secs(5)
        ));

        let snapshot = registry.resolve_all().await;
        assert!(snapshot.get("stuck").unwrap().is_failed());
        assert!(!snapshot.get("answer").unwrap().is_failed());
    }
}
