//! Indexed, read-only parameter table.

use crate::error::{Error, Result};
use crate::{Address, DeviceInfo, ParameterDefinition, ParameterGroup};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// A parameter resolved against the table, with its absolute address.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedParameter<'a> {
    pub group: &'a ParameterGroup,
    pub definition: &'a ParameterDefinition,
    pub address: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ParameterSlot {
    group: usize,
    parameter: usize,
}

/// Group and parameter lookups plus the reverse address index.
///
/// All indexes are built once in [`ParameterTable::new`]; the table is
/// immutable afterwards and is normally shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ParameterTable {
    device: DeviceInfo,
    groups: Vec<ParameterGroup>,
    group_index: HashMap<String, usize>,
    /// Per group: parameter name -> position
    parameter_index: Vec<HashMap<String, usize>>,
    /// Per group, per parameter: absolute address
    addresses: Vec<Vec<Address>>,
    address_index: HashMap<Address, ParameterSlot>,
}

impl ParameterTable {
    pub fn new(device: DeviceInfo, groups: Vec<ParameterGroup>) -> Result<Self> {
        let mut group_index = HashMap::with_capacity(groups.len());
        let mut parameter_index = Vec::with_capacity(groups.len());
        let mut addresses = Vec::with_capacity(groups.len());
        let mut address_index = HashMap::new();
        let mut occupied: HashMap<Address, ParameterSlot> = HashMap::new();

        for (group_pos, group) in groups.iter().enumerate() {
            if group_index.insert(group.name.clone(), group_pos).is_some() {
                return Err(Error::DuplicateGroup(group.name.clone()));
            }
            if group.base_address.iter().any(|b| *b > 0x7F) {
                return Err(Error::InvalidBaseAddress(group.name.clone()));
            }

            let mut names = HashMap::with_capacity(group.parameters.len());
            let mut offsets = HashMap::with_capacity(group.parameters.len());
            let mut group_addresses = Vec::with_capacity(group.parameters.len());

            for (param_pos, param) in group.parameters.iter().enumerate() {
                Self::validate_definition(group, param)?;

                if names.insert(param.name.clone(), param_pos).is_some() {
                    return Err(Error::DuplicateParameter {
                        group: group.name.clone(),
                        parameter: param.name.clone(),
                    });
                }
                if offsets.insert(param.offset, param_pos).is_some() {
                    return Err(Error::DuplicateOffset {
                        group: group.name.clone(),
                        offset: param.offset,
                    });
                }

                let address = group.address_of(param).ok_or_else(|| Error::AddressOverflow {
                    group: group.name.clone(),
                    parameter: param.name.clone(),
                })?;

                let slot = ParameterSlot {
                    group: group_pos,
                    parameter: param_pos,
                };

                // Multi-byte parameters occupy one address per data byte.
                for k in 0..param.size as u32 {
                    let byte_address =
                        address.offset_by(k).ok_or_else(|| Error::AddressOverflow {
                            group: group.name.clone(),
                            parameter: param.name.clone(),
                        })?;
                    match occupied.entry(byte_address) {
                        Entry::Occupied(existing) => {
                            let other: &ParameterSlot = existing.get();
                            let other_group = &groups[other.group];
                            return Err(Error::AddressCollision {
                                address: byte_address,
                                group: group.name.clone(),
                                parameter: param.name.clone(),
                                other: format!(
                                    "{}/{}",
                                    other_group.name,
                                    other_group.parameters[other.parameter].name
                                ),
                            });
                        }
                        Entry::Vacant(vacant) => {
                            vacant.insert(slot);
                        }
                    }
                }

                address_index.insert(address, slot);
                group_addresses.push(address);
            }

            parameter_index.push(names);
            addresses.push(group_addresses);
        }

        debug!(
            "Built parameter table: {} groups, {} addresses",
            groups.len(),
            address_index.len()
        );

        Ok(Self {
            device,
            groups,
            group_index,
            parameter_index,
            addresses,
            address_index,
        })
    }

    fn validate_definition(group: &ParameterGroup, param: &ParameterDefinition) -> Result<()> {
        if !(1..=4).contains(&param.size) {
            return Err(Error::InvalidSize {
                group: group.name.clone(),
                parameter: param.name.clone(),
                size: param.size,
            });
        }

        let (lowest, highest) = param.representable_range();
        let in_range = param.min <= param.max
            && lowest <= param.min as i64
            && (param.max as i64) <= highest;
        if !in_range {
            return Err(Error::InvalidRange {
                group: group.name.clone(),
                parameter: param.name.clone(),
                min: param.min,
                max: param.max,
            });
        }
        Ok(())
    }

    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }

    pub fn groups(&self) -> &[ParameterGroup] {
        &self.groups
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    pub fn group(&self, name: &str) -> Result<&ParameterGroup> {
        self.group_index
            .get(name)
            .map(|&pos| &self.groups[pos])
            .ok_or_else(|| Error::UnknownGroup(name.to_string()))
    }

    pub fn contains_group(&self, name: &str) -> bool {
        self.group_index.contains_key(name)
    }

    pub fn parameter_names(&self, group: &str) -> Result<Vec<&str>> {
        Ok(self
            .group(group)?
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect())
    }

    /// Resolve `(group, parameter)` to its definition and absolute address.
    pub fn lookup(&self, group: &str, parameter: &str) -> Result<ResolvedParameter<'_>> {
        let group_pos = *self
            .group_index
            .get(group)
            .ok_or_else(|| Error::UnknownGroup(group.to_string()))?;
        let param_pos = *self.parameter_index[group_pos]
            .get(parameter)
            .ok_or_else(|| Error::UnknownParameter {
                group: group.to_string(),
                parameter: parameter.to_string(),
            })?;
        Ok(self.slot(ParameterSlot {
            group: group_pos,
            parameter: param_pos,
        }))
    }

    pub fn parameter(&self, group: &str, parameter: &str) -> Result<&ParameterDefinition> {
        self.lookup(group, parameter).map(|r| r.definition)
    }

    /// Reverse lookup through the precomputed address index.
    pub fn resolve_address(&self, address: Address) -> Option<ResolvedParameter<'_>> {
        self.address_index
            .get(&address)
            .map(|&slot| self.slot(slot))
    }

    /// Total number of parameters across all groups.
    pub fn parameter_count(&self) -> usize {
        self.address_index.len()
    }

    /// Every parameter in table order.
    pub fn iter(&self) -> impl Iterator<Item = ResolvedParameter<'_>> {
        self.groups.iter().enumerate().flat_map(move |(g, group)| {
            (0..group.parameters.len()).map(move |p| {
                self.slot(ParameterSlot {
                    group: g,
                    parameter: p,
                })
            })
        })
    }

    fn slot(&self, slot: ParameterSlot) -> ResolvedParameter<'_> {
        let group = &self.groups[slot.group];
        ResolvedParameter {
            group,
            definition: &group.parameters[slot.parameter],
            address: self.addresses[slot.group][slot.parameter],
        }
    }
}
