//! Flat output rows
//!
//! Column names match the published table layout exactly, so the serde
//! renames below are part of the output contract.

use crate::crawler::ErrorIndicator;
use crate::extract::{AddressField, PartialAddress};
use serde::{Deserialize, Serialize};

/// One row of the address table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    #[serde(rename = "Website")]
    pub website: String,

    #[serde(rename = "Country")]
    pub country: Option<String>,

    #[serde(rename = "Region")]
    pub region: Option<String>,

    #[serde(rename = "City")]
    pub city: Option<String>,

    #[serde(rename = "Postcode")]
    pub postcode: Option<String>,

    #[serde(rename = "Road")]
    pub road: Option<String>,

    #[serde(rename = "Road Number")]
    pub road_number: Option<String>,
}

impl AddressRecord {
    /// Flattens one extracted address for `website`
    pub fn from_address(website: &str, address: &PartialAddress) -> Self {
        let field = |f: AddressField| address.get(f).map(str::to_string);

        Self {
            website: website.to_string(),
            country: field(AddressField::Country),
            region: field(AddressField::Region),
            city: field(AddressField::City),
            postcode: field(AddressField::Postcode),
            road: field(AddressField::Road),
            road_number: field(AddressField::RoadNumber),
        }
    }

    /// Rebuilds the address carried by this row
    pub fn to_address(&self) -> PartialAddress {
        let mut address = PartialAddress::new();
        let columns = [
            (AddressField::Country, &self.country),
            (AddressField::Region, &self.region),
            (AddressField::City, &self.city),
            (AddressField::Postcode, &self.postcode),
            (AddressField::Road, &self.road),
            (AddressField::RoadNumber, &self.road_number),
        ];

        for (field, value) in columns {
            if let Some(value) = value {
                address.insert(field, value.as_str());
            }
        }

        address
    }
}

/// One row of the error table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    #[serde(rename = "Website")]
    pub website: String,

    /// HTTP status code, or `Error` when the site was unreachable
    #[serde(rename = "Error")]
    pub error: String,
}

impl ErrorRecord {
    pub fn new(website: &str, indicator: ErrorIndicator) -> Self {
        Self {
            website: website.to_string(),
            error: indicator.to_string(),
        }
    }
}
