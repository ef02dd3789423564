use crate::counter::Counter;
use crate::id::*;
use std::collections::HashMap;

/// A resource kind definition.
#[derive(Debug, Clone)]
pub struct ResourceDef {
    pub name: String,
}

/// A producer type: what it costs and what one active unit yields per step.
#[derive(Debug, Clone)]
pub struct ProducerDef {
    pub name: String,
    pub price: Counter<ResourceId>,
    pub output: Counter<ResourceId>,
}

#[derive(Debug, Clone)]
struct ProducerEntry {
    name: String,
    price: Vec<(ResourceId, u32)>,
    output: Vec<(ResourceId, u32)>,
}

/// Builder for an immutable [`Catalog`].
///
/// Resources and producers are registered in declaration order; that order is
/// the order the search tries purchases in.
#[derive(Debug)]
pub struct CatalogBuilder {
    economy_id: u32,
    resources: Vec<ResourceDef>,
    producers: Vec<ProducerEntry>,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            economy_id: 1,
            resources: Vec::new(),
            producers: Vec::new(),
        }
    }

    /// Set the economy (blueprint) id used when scoring. Defaults to 1.
    pub fn economy_id(&mut self, id: u32) -> &mut Self {
        self.economy_id = id;
        self
    }

    /// Register a resource kind. Returns its ID.
    pub fn register_resource(&mut self, name: &str) -> ResourceId {
        let id = ResourceId(self.resources.len() as u32);
        self.resources.push(ResourceDef {
            name: name.to_string(),
        });
        id
    }

    /// Register a producer type. Returns its ID.
    pub fn register_producer(
        &mut self,
        name: &str,
        price: &[(ResourceId, u32)],
        output: &[(ResourceId, u32)],
    ) -> ProducerId {
        let id = ProducerId(self.producers.len() as u32);
        self.producers.push(ProducerEntry {
            name: name.to_string(),
            price: price.to_vec(),
            output: output.to_vec(),
        });
        id
    }

    /// Register a producer whose price and output name already-registered
    /// resources.
    pub fn register_producer_named(
        &mut self,
        name: &str,
        price: &[(&str, u32)],
        output: &[(&str, u32)],
    ) -> Result<ProducerId, CatalogError> {
        let price = self.resolve_entries(price)?;
        let output = self.resolve_entries(output)?;
        Ok(self.register_producer(name, &price, &output))
    }

    /// Lookup a registered resource by name.
    pub fn resource_id(&self, name: &str) -> Option<ResourceId> {
        self.resources
            .iter()
            .position(|r| r.name == name)
            .map(|idx| ResourceId(idx as u32))
    }

    fn resolve_entries(&self, entries: &[(&str, u32)]) -> Result<Vec<(ResourceId, u32)>, CatalogError> {
        entries
            .iter()
            .map(|&(name, amount)| {
                self.resource_id(name)
                    .map(|id| (id, amount))
                    .ok_or_else(|| CatalogError::NotFound {
                        kind: "resource",
                        name: name.to_string(),
                    })
            })
            .collect()
    }

    /// Finalize. Rejects duplicate names and dangling resource references.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut resource_name_to_id = HashMap::new();
        for (idx, resource) in self.resources.iter().enumerate() {
            if resource_name_to_id
                .insert(resource.name.clone(), ResourceId(idx as u32))
                .is_some()
            {
                return Err(CatalogError::DuplicateName {
                    kind: "resource",
                    name: resource.name.clone(),
                });
            }
        }

        let resource_count = self.resources.len();
        let mut producer_name_to_id = HashMap::new();
        let mut producers = Vec::with_capacity(self.producers.len());
        for (idx, entry) in self.producers.into_iter().enumerate() {
            for &(resource, _) in entry.price.iter().chain(entry.output.iter()) {
                if resource.index() >= resource_count {
                    return Err(CatalogError::InvalidResourceRef(resource));
                }
            }
            if producer_name_to_id
                .insert(entry.name.clone(), ProducerId(idx as u32))
                .is_some()
            {
                return Err(CatalogError::DuplicateName {
                    kind: "producer",
                    name: entry.name,
                });
            }
            producers.push(ProducerDef {
                price: Counter::from_entries(resource_count, &entry.price),
                output: Counter::from_entries(resource_count, &entry.output),
                name: entry.name,
            });
        }

        Ok(Catalog {
            economy_id: self.economy_id,
            resources: self.resources,
            resource_name_to_id,
            producers,
            producer_name_to_id,
        })
    }
}

/// Immutable producer catalog for one economy. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct Catalog {
    economy_id: u32,
    resources: Vec<ResourceDef>,
    resource_name_to_id: HashMap<String, ResourceId>,
    producers: Vec<ProducerDef>,
    producer_name_to_id: HashMap<String, ProducerId>,
}

impl Catalog {
    pub fn economy_id(&self) -> u32 {
        self.economy_id
    }

    pub fn resource(&self, id: ResourceId) -> Option<&ResourceDef> {
        self.resources.get(id.index())
    }

    pub fn producer(&self, id: ProducerId) -> Option<&ProducerDef> {
        self.producers.get(id.index())
    }

    pub fn resource_id(&self, name: &str) -> Option<ResourceId> {
        self.resource_name_to_id.get(name).copied()
    }

    pub fn producer_id(&self, name: &str) -> Option<ProducerId> {
        self.producer_name_to_id.get(name).copied()
    }

    /// Like [`resource_id`](Self::resource_id) but unknown names are an error.
    pub fn require_resource(&self, name: &str) -> Result<ResourceId, CatalogError> {
        self.resource_id(name).ok_or_else(|| CatalogError::NotFound {
            kind: "resource",
            name: name.to_string(),
        })
    }

    /// Like [`producer_id`](Self::producer_id) but unknown names are an error.
    pub fn require_producer(&self, name: &str) -> Result<ProducerId, CatalogError> {
        self.producer_id(name).ok_or_else(|| CatalogError::NotFound {
            kind: "producer",
            name: name.to_string(),
        })
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn producer_count(&self) -> usize {
        self.producers.len()
    }

    /// Resource ids in declaration order.
    pub fn resource_ids(&self) -> impl Iterator<Item = ResourceId> + '_ {
        (0..self.resources.len()).map(ResourceId::from_index)
    }

    /// Producer ids in declaration order.
    pub fn producer_ids(&self) -> impl Iterator<Item = ProducerId> + '_ {
        (0..self.producers.len()).map(ProducerId::from_index)
    }

    /// Display name of a resource, or `"?"` for a foreign id.
    pub fn resource_name(&self, id: ResourceId) -> &str {
        self.resource(id).map(|r| r.name.as_str()).unwrap_or("?")
    }

    /// Display name of a producer, or `"?"` for a foreign id.
    pub fn producer_name(&self, id: ProducerId) -> &str {
        self.producer(id).map(|p| p.name.as_str()).unwrap_or("?")
    }

    /// An all-zero resource stock sized for this catalog.
    pub fn empty_stock(&self) -> Counter<ResourceId> {
        Counter::with_keys(self.resources.len())
    }

    /// An all-zero producer stock sized for this catalog.
    pub fn empty_fleet(&self) -> Counter<ProducerId> {
        Counter::with_keys(self.producers.len())
    }

    /// True iff `stock` covers every resource in the producer's price.
    pub fn can_afford(&self, producer: ProducerId, stock: &Counter<ResourceId>) -> bool {
        self.producer(producer)
            .map(|p| stock.covers(&p.price))
            .unwrap_or(false)
    }

    /// Subtract the producer's full price from `stock`. Leaves `stock` as it
    /// was and returns an error when the price is not covered.
    pub fn deduct(&self, producer: ProducerId, stock: &mut Counter<ResourceId>) -> Result<(), CatalogError> {
        let def = self
            .producer(producer)
            .ok_or(CatalogError::InvalidProducerRef(producer))?;
        if stock.subtract(&def.price) {
            Ok(())
        } else {
            Err(CatalogError::Unaffordable {
                producer: def.name.clone(),
            })
        }
    }

    /// The most any producer charges of `resource`; 0 if none charges it.
    pub fn max_price(&self, resource: ResourceId) -> u32 {
        self.producers
            .iter()
            .map(|p| p.price.get(resource))
            .max()
            .unwrap_or(0)
    }

    /// The largest per-step output of `resource` by any single producer type.
    pub fn max_output_of(&self, resource: ResourceId) -> u32 {
        self.producers
            .iter()
            .map(|p| p.output.get(resource))
            .max()
            .unwrap_or(0)
    }

    /// Producers with a non-zero output of `resource`, in declaration order.
    pub fn producers_producing(&self, resource: ResourceId) -> Vec<ProducerId> {
        self.producer_ids()
            .filter(|&id| self.producers[id.index()].output.get(resource) > 0)
            .collect()
    }

    /// Render a count map as `"2 ore, 7 obsidian"`, skipping zeros.
    pub fn describe_amounts(&self, amounts: &Counter<ResourceId>) -> String {
        amounts
            .iter_nonzero()
            .map(|(resource, amount)| format!("{amount} {}", self.resource_name(resource)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },
    #[error("duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },
    #[error("invalid resource reference: {0:?}")]
    InvalidResourceRef(ResourceId),
    #[error("invalid producer reference: {0:?}")]
    InvalidProducerRef(ProducerId),
    #[error("cannot afford {producer}")]
    Unaffordable { producer: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_builder() -> CatalogBuilder {
        let mut b = CatalogBuilder::new();
        let ore = b.register_resource("ore");
        let clay = b.register_resource("clay");
        let obsidian = b.register_resource("obsidian");
        let geode = b.register_resource("geode");
        b.register_producer("ore robot", &[(ore, 4)], &[(ore, 1)]);
        b.register_producer("clay robot", &[(ore, 2)], &[(clay, 1)]);
        b.register_producer("obsidian robot", &[(ore, 3), (clay, 14)], &[(obsidian, 1)]);
        b.register_producer("geode robot", &[(ore, 2), (obsidian, 7)], &[(geode, 1)]);
        b
    }

    fn stock(catalog: &Catalog, entries: &[(&str, u32)]) -> Counter<ResourceId> {
        let mut stock = catalog.empty_stock();
        for &(name, amount) in entries {
            stock.set(catalog.resource_id(name).unwrap(), amount);
        }
        stock
    }

    #[test]
    fn register_and_build() {
        let catalog = setup_builder().build().unwrap();
        assert_eq!(catalog.resource_count(), 4);
        assert_eq!(catalog.producer_count(), 4);
        assert_eq!(catalog.economy_id(), 1);
    }

    #[test]
    fn lookup_by_name() {
        let catalog = setup_builder().build().unwrap();
        assert_eq!(catalog.producer_id("clay robot"), Some(ProducerId(1)));
        assert!(catalog.producer_id("diamond robot").is_none());
        assert!(matches!(
            catalog.require_resource("diamond"),
            Err(CatalogError::NotFound { kind: "resource", .. })
        ));
    }

    #[test]
    fn can_afford_requires_every_resource() {
        let catalog = setup_builder().build().unwrap();
        let obsidian_robot = catalog.producer_id("obsidian robot").unwrap();
        assert!(!catalog.can_afford(obsidian_robot, &stock(&catalog, &[("ore", 3), ("clay", 13)])));
        assert!(!catalog.can_afford(obsidian_robot, &stock(&catalog, &[("ore", 2), ("clay", 14)])));
        assert!(catalog.can_afford(obsidian_robot, &stock(&catalog, &[("ore", 3), ("clay", 14)])));
    }

    #[test]
    fn deduct_subtracts_full_price() {
        let catalog = setup_builder().build().unwrap();
        let geode_robot = catalog.producer_id("geode robot").unwrap();
        let mut s = stock(&catalog, &[("ore", 5), ("obsidian", 7)]);
        catalog.deduct(geode_robot, &mut s).unwrap();
        assert_eq!(s, stock(&catalog, &[("ore", 3)]));
    }

    #[test]
    fn deduct_unaffordable_leaves_stock() {
        let catalog = setup_builder().build().unwrap();
        let geode_robot = catalog.producer_id("geode robot").unwrap();
        let mut s = stock(&catalog, &[("ore", 5), ("obsidian", 6)]);
        let before = s.clone();
        let result = catalog.deduct(geode_robot, &mut s);
        assert!(matches!(result, Err(CatalogError::Unaffordable { .. })));
        assert_eq!(s, before);
    }

    #[test]
    fn max_price_per_resource() {
        let catalog = setup_builder().build().unwrap();
        let id = |name: &str| catalog.resource_id(name).unwrap();
        assert_eq!(catalog.max_price(id("ore")), 4);
        assert_eq!(catalog.max_price(id("clay")), 14);
        assert_eq!(catalog.max_price(id("obsidian")), 7);
        assert_eq!(catalog.max_price(id("geode")), 0);
    }

    #[test]
    fn max_output_and_producers_producing() {
        let mut b = setup_builder();
        let ore = b.resource_id("ore").unwrap();
        let clay = b.resource_id("clay").unwrap();
        b.register_producer("dredge", &[(ore, 9)], &[(clay, 3), (ore, 1)]);
        let catalog = b.build().unwrap();

        assert_eq!(catalog.max_output_of(clay), 3);
        assert_eq!(catalog.max_output_of(ore), 1);
        assert_eq!(
            catalog.producers_producing(clay),
            vec![ProducerId(1), ProducerId(4)]
        );
        let geode = catalog.resource_id("geode").unwrap();
        assert_eq!(catalog.producers_producing(geode), vec![ProducerId(3)]);
    }

    #[test]
    fn register_producer_named_resolves_resources() {
        let mut b = CatalogBuilder::new();
        b.register_resource("ore");
        let id = b
            .register_producer_named("miner", &[("ore", 2)], &[("ore", 1)])
            .unwrap();
        let catalog = b.build().unwrap();
        let miner = catalog.producer(id).unwrap();
        assert_eq!(miner.price.get(ResourceId(0)), 2);
    }

    #[test]
    fn register_producer_named_unknown_resource_fails() {
        let mut b = CatalogBuilder::new();
        b.register_resource("ore");
        let result = b.register_producer_named("miner", &[("gold", 2)], &[]);
        match result {
            Err(CatalogError::NotFound { kind, name }) => {
                assert_eq!(kind, "resource");
                assert_eq!(name, "gold");
            }
            other => panic!("expected NotFound, got: {other:?}"),
        }
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut b = setup_builder();
        b.register_resource("ore");
        assert!(matches!(
            b.build(),
            Err(CatalogError::DuplicateName { kind: "resource", .. })
        ));

        let mut b = setup_builder();
        b.register_producer("clay robot", &[], &[]);
        assert!(matches!(
            b.build(),
            Err(CatalogError::DuplicateName { kind: "producer", .. })
        ));
    }

    #[test]
    fn invalid_resource_ref_fails() {
        let mut b = CatalogBuilder::new();
        b.register_producer("bad", &[(ResourceId(9), 1)], &[]);
        match b.build() {
            Err(CatalogError::InvalidResourceRef(id)) => assert_eq!(id, ResourceId(9)),
            other => panic!("expected InvalidResourceRef, got: {other:?}"),
        }
    }

    #[test]
    fn describe_amounts_skips_zero() {
        let catalog = setup_builder().build().unwrap();
        let geode_robot = catalog.producer(ProducerId(3)).unwrap();
        assert_eq!(catalog.describe_amounts(&geode_robot.price), "2 ore, 7 obsidian");
    }

    #[test]
    fn foreign_producer_is_never_affordable() {
        let catalog = setup_builder().build().unwrap();
        let s = stock(&catalog, &[("ore", 100)]);
        assert!(!catalog.can_afford(ProducerId(99), &s));
        let mut s = s;
        assert!(matches!(
            catalog.deduct(ProducerId(99), &mut s),
            Err(CatalogError::InvalidProducerRef(_))
        ));
    }

    #[test]
    fn catalog_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }
}
