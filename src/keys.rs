//! Structured cache keys for queries.
//!
//! Every cached read is keyed by a [`QueryKey`]: the resource type name alone
//! for a collection, plus the entity id for an entity read, plus a `detail`
//! discriminator for expanded reads. Keys with the same components are the
//! same cache slot; two different logical queries must never share a key.
//!
//! Keys render to a canonical string (`"clients"`, `"clients/42"`,
//! `"orders/42/detail"`) which is what the cache is indexed by.

use std::fmt;

/// The closed set of resource types the dashboard synchronizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Clients,
    Employees,
    Orders,
    Products,
    Tables,
    Users,
    Expenses,
    ExpenseTypes,
    FinanceSummary,
    SalesSubtotal,
}

impl Resource {
    /// Canonical name used as the leading key component.
    pub const fn name(self) -> &'static str {
        match self {
            Resource::Clients => "clients",
            Resource::Employees => "employees",
            Resource::Orders => "orders",
            Resource::Products => "products",
            Resource::Tables => "tables",
            Resource::Users => "users",
            Resource::Expenses => "expenses",
            Resource::ExpenseTypes => "expense-types",
            Resource::FinanceSummary => "finance-summary",
            Resource::SalesSubtotal => "sales-subtotal",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cache slot identifier for a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// All entities of one resource type.
    Collection(Resource),
    /// A collection narrowed by a parameter (e.g. finance summary by start
    /// date). The scope participates in the key so different parameters get
    /// different slots.
    Scoped { resource: Resource, scope: String },
    /// A single identified entity.
    Entity { resource: Resource, id: i64 },
    /// A single entity with expanded nested detail, cached separately from
    /// the plain entity read.
    Detail { resource: Resource, id: i64 },
}

impl QueryKey {
    pub fn collection(resource: Resource) -> Self {
        QueryKey::Collection(resource)
    }

    pub fn scoped(resource: Resource, scope: impl Into<String>) -> Self {
        QueryKey::Scoped {
            resource,
            scope: scope.into(),
        }
    }

    pub fn entity(resource: Resource, id: i64) -> Self {
        QueryKey::Entity { resource, id }
    }

    pub fn detail(resource: Resource, id: i64) -> Self {
        QueryKey::Detail { resource, id }
    }

    /// Canonical cache string for this key.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Collection(resource) => write!(f, "{resource}"),
            QueryKey::Scoped { resource, scope } => write!(f, "{resource}?{scope}"),
            QueryKey::Entity { resource, id } => write!(f, "{resource}/{id}"),
            QueryKey::Detail { resource, id } => write!(f, "{resource}/{id}/detail"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_canonical_strings() {
        assert_eq!(QueryKey::collection(Resource::Clients).render(), "clients");
        assert_eq!(
            QueryKey::entity(Resource::Clients, 42).render(),
            "clients/42"
        );
        assert_eq!(
            QueryKey::detail(Resource::Orders, 42).render(),
            "orders/42/detail"
        );
        assert_eq!(
            QueryKey::scoped(Resource::FinanceSummary, "2026-08-01").render(),
            "finance-summary?2026-08-01"
        );
    }

    #[test]
    fn distinct_logical_queries_never_collide() {
        let keys = [
            QueryKey::collection(Resource::Orders).render(),
            QueryKey::entity(Resource::Orders, 7).render(),
            QueryKey::detail(Resource::Orders, 7).render(),
            QueryKey::entity(Resource::Products, 7).render(),
            QueryKey::scoped(Resource::FinanceSummary, "2026-08-01").render(),
            QueryKey::scoped(Resource::FinanceSummary, "2026-08-02").render(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn same_components_are_the_same_slot() {
        assert_eq!(
            QueryKey::entity(Resource::Tables, 3),
            QueryKey::entity(Resource::Tables, 3)
        );
        assert_eq!(
            QueryKey::entity(Resource::Tables, 3).render(),
            QueryKey::entity(Resource::Tables, 3).render()
        );
    }
}
