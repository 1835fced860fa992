use serde::{Deserialize, Serialize};

macro_rules! sequential_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

sequential_id!(
    /// Territory id, allocated from 1 by the territory registry.
    TerritoryId
);

sequential_id!(
    /// Community id, allocated from 1 by the community registry.
    CommunityId
);

sequential_id!(
    /// Benefit-sharing agreement id.
    AgreementId
);

sequential_id!(
    /// Payment id, sequential within one agreement only.
    PaymentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_roundtrip_as_plain_integers() {
        let id: TerritoryId = serde_json::from_str("7").unwrap();
        assert_eq!(id, TerritoryId(7));
        assert_eq!(id.to_string(), "7");
        assert_eq!(PaymentId::from(3).get(), 3);
    }
}
