//! Interned, read-only view of the population.
//!
//! [`RosterBuilder`] accepts the external string-keyed inputs (detail map,
//! preference map, anti-preference list) and resolves them once into dense
//! [`MemberId`] indices. Every trial then shares the same `&Roster`.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use super::types::{Detail, Identity, MemberId};
use super::weight::multiplier;

/// Separator of the canonical `A__B` anti-preference encoding.
pub const EXCLUSION_SEPARATOR: &str = "__";

#[derive(Debug, Clone)]
struct Member {
    identity: Identity,
    detail: Detail,
    weight: u32,
}

/// The resolved population: identities, details, preferences and exclusions.
///
/// # Examples
///
/// ```
/// use u_grouping::roster::{Detail, RosterBuilder};
///
/// let roster = RosterBuilder::new()
///     .detail("a", Detail::male())
///     .detail("b--x2", Detail::female())
///     .preferences("a", ["b--x2"])
///     .anti_preference("a__b--x2")
///     .build();
///
/// let a = roster.id_of("a").unwrap();
/// let b = roster.id_of("b--x2").unwrap();
/// assert_eq!(roster.weight(b), 2);
/// assert!(roster.prefers(a, b));
/// assert!(roster.excluded(b, a));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Roster {
    members: Vec<Member>,
    index: HashMap<Identity, MemberId>,
    preferences: Vec<Vec<MemberId>>,
    preferred: Vec<HashSet<MemberId>>,
    exclusions: HashSet<(MemberId, MemberId)>,
    universe: Vec<MemberId>,
    unresolved: usize,
}

impl Roster {
    /// Number of identities with a detail record.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the roster holds no identities.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Looks up the index of an identity.
    pub fn id_of(&self, identity: &str) -> Option<MemberId> {
        self.index.get(identity).copied()
    }

    /// The external key of `id`.
    pub fn identity(&self, id: MemberId) -> &str {
        &self.members[id].identity
    }

    /// The detail record of `id`.
    pub fn detail(&self, id: MemberId) -> &Detail {
        &self.members[id].detail
    }

    /// Multiplicity of `id`, see [`multiplier`].
    pub fn weight(&self, id: MemberId) -> u32 {
        self.members[id].weight
    }

    pub fn is_male(&self, id: MemberId) -> bool {
        self.members[id].detail.male
    }

    /// Resolved preference list of `id`, in the order it was given.
    pub fn preferences(&self, id: MemberId) -> &[MemberId] {
        &self.preferences[id]
    }

    /// Whether `id` expressed at least one resolvable preference.
    pub fn has_preferences(&self, id: MemberId) -> bool {
        !self.preferences[id].is_empty()
    }

    /// Whether `who` lists `whom` as a preference.
    pub fn prefers(&self, who: MemberId, whom: MemberId) -> bool {
        self.preferred[who].contains(&whom)
    }

    /// Whether `a` and `b` must never share a group. Symmetric.
    pub fn excluded(&self, a: MemberId, b: MemberId) -> bool {
        self.exclusions.contains(&ordered_pair(a, b))
    }

    /// Number of distinct exclusion pairs.
    pub fn exclusion_count(&self) -> usize {
        self.exclusions.len()
    }

    /// Participating identities, in roster order.
    pub fn universe(&self) -> &[MemberId] {
        &self.universe
    }

    /// Participating identities that expressed preferences.
    ///
    /// These are the identities the ranked placement loop processes.
    pub fn ranked_participants(&self) -> Vec<MemberId> {
        self.universe
            .iter()
            .copied()
            .filter(|&id| self.has_preferences(id))
            .collect()
    }

    /// Number of preference or anti-preference references that named an
    /// identity without a detail record and were dropped.
    pub fn unresolved(&self) -> usize {
        self.unresolved
    }
}

/// Collects string-keyed inputs and resolves them into a [`Roster`].
///
/// Detail records define the population and its order. Preference-map
/// entries take precedence over a detail's raw preference list.
#[derive(Debug, Clone, Default)]
pub struct RosterBuilder {
    details: Vec<(Identity, Detail)>,
    positions: HashMap<Identity, usize>,
    preferences: HashMap<Identity, Vec<Identity>>,
    anti_preferences: Vec<String>,
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the detail record of an identity.
    pub fn detail(mut self, identity: impl Into<Identity>, detail: Detail) -> Self {
        let identity = identity.into();
        match self.positions.get(&identity) {
            Some(&pos) => self.details[pos].1 = detail,
            None => {
                self.positions.insert(identity.clone(), self.details.len());
                self.details.push((identity, detail));
            }
        }
        self
    }

    /// Adds several detail records, keeping iteration order.
    pub fn details<I, S>(self, details: I) -> Self
    where
        I: IntoIterator<Item = (S, Detail)>,
        S: Into<Identity>,
    {
        details
            .into_iter()
            .fold(self, |builder, (identity, detail)| builder.detail(identity, detail))
    }

    /// Sets the preference-map entry of an identity.
    pub fn preferences<I, S>(mut self, identity: impl Into<Identity>, preferred: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Identity>,
    {
        self.preferences.insert(
            identity.into(),
            preferred.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Sets several preference-map entries.
    pub fn preference_map<I, S, L>(self, map: I) -> Self
    where
        I: IntoIterator<Item = (S, L)>,
        S: Into<Identity>,
        L: IntoIterator,
        L::Item: Into<Identity>,
    {
        map.into_iter()
            .fold(self, |builder, (identity, preferred)| {
                builder.preferences(identity, preferred)
            })
    }

    /// Adds one canonical `A__B` anti-preference.
    pub fn anti_preference(mut self, encoded: impl Into<String>) -> Self {
        self.anti_preferences.push(encoded.into());
        self
    }

    /// Adds a list of canonical `A__B` anti-preferences.
    pub fn anti_preferences<I, S>(mut self, encoded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.anti_preferences
            .extend(encoded.into_iter().map(Into::into));
        self
    }

    /// Resolves all references and produces the roster.
    ///
    /// Unknown identities in preference lists or anti-preferences are
    /// dropped with a warning; self-references and duplicate preferences
    /// are dropped silently.
    pub fn build(self) -> Roster {
        let RosterBuilder {
            details,
            positions: index,
            mut preferences,
            anti_preferences,
        } = self;

        let members: Vec<Member> = details
            .into_iter()
            .map(|(identity, detail)| Member {
                weight: multiplier(&identity),
                identity,
                detail,
            })
            .collect();

        let mut unresolved = 0usize;
        let mut resolved_prefs = Vec::with_capacity(members.len());
        let mut preferred = Vec::with_capacity(members.len());

        for (id, member) in members.iter().enumerate() {
            let raw = preferences
                .remove(&member.identity)
                .or_else(|| member.detail.preferences.clone())
                .unwrap_or_default();

            let mut list = Vec::with_capacity(raw.len());
            let mut seen = HashSet::with_capacity(raw.len());
            for name in &raw {
                match index.get(name.as_str()) {
                    Some(&other) if other != id => {
                        if seen.insert(other) {
                            list.push(other);
                        }
                    }
                    Some(_) => {}
                    None => {
                        warn!(
                            identity = %member.identity,
                            preference = %name,
                            "dropping preference for unknown identity"
                        );
                        unresolved += 1;
                    }
                }
            }
            resolved_prefs.push(list);
            preferred.push(seen);
        }

        for identity in preferences.keys() {
            warn!(identity = %identity, "dropping preference entry without detail record");
            unresolved += 1;
        }

        let mut exclusions = HashSet::new();
        for encoded in &anti_preferences {
            match split_exclusion(encoded, &index) {
                Some((a, b)) if a != b => {
                    exclusions.insert(ordered_pair(a, b));
                }
                Some(_) => {}
                None => {
                    warn!(anti_preference = %encoded, "dropping unresolvable anti-preference");
                    unresolved += 1;
                }
            }
        }

        let universe = members
            .iter()
            .enumerate()
            .filter(|(_, m)| m.detail.is_participating())
            .map(|(id, _)| id)
            .collect();

        Roster {
            members,
            index,
            preferences: resolved_prefs,
            preferred,
            exclusions,
            universe,
            unresolved,
        }
    }
}

/// Splits `A__B` at the first separator whose halves are both known.
///
/// Trying every separator position keeps identities that themselves
/// contain `__` resolvable.
fn split_exclusion(
    encoded: &str,
    index: &HashMap<Identity, MemberId>,
) -> Option<(MemberId, MemberId)> {
    encoded
        .match_indices(EXCLUSION_SEPARATOR)
        .find_map(|(pos, sep)| {
            let left = index.get(&encoded[..pos])?;
            let right = index.get(&encoded[pos + sep.len()..])?;
            Some((*left, *right))
        })
}

fn ordered_pair(a: MemberId, b: MemberId) -> (MemberId, MemberId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
