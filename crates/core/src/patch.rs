//! Field patches for partial show updates.
//!
//! A patch addresses each editable field with an explicit tri-state:
//! a key that is absent from the payload leaves the field untouched,
//! an explicit `null` clears it, and a value replaces it. That makes the
//! partial-update contract unambiguous instead of inferred from
//! conditional expressions, and it lets nested fields (`venue.phone`,
//! `financials.bonus`, …) be changed without resending the whole object.
//!
//! Application is pure: [`ShowPatch::apply`] produces a new record and
//! never touches `updated_at` — refreshing that is the gateway's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::CoreError;
use crate::show::{Attachment, Buyer, CrewMember, Show, ShowStatus, Travel};

// ---------------------------------------------------------------------------
// Patch<T>
// ---------------------------------------------------------------------------

/// Tri-state value for one patched field.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    /// Field was not mentioned; leave it untouched.
    Keep,
    /// Field was explicitly `null`; clear it.
    Clear,
    /// Field was given a value; replace it.
    Set(T),
}

// Hand-written so `Patch<T>` defaults to `Keep` without requiring
// `T: Default`.
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }
}

impl<T: Clone> Patch<T> {
    /// Apply to an optional slot.
    pub fn apply_optional(&self, slot: &mut Option<T>) {
        match self {
            Patch::Keep => {}
            Patch::Clear => *slot = None,
            Patch::Set(value) => *slot = Some(value.clone()),
        }
    }

    /// Apply to a required slot; clearing is a validation failure.
    pub fn apply_required(&self, slot: &mut T, field: &str) -> Result<(), CoreError> {
        match self {
            Patch::Keep => Ok(()),
            Patch::Clear => Err(CoreError::Validation(format!(
                "`{field}` is required and cannot be cleared"
            ))),
            Patch::Set(value) => {
                *slot = value.clone();
                Ok(())
            }
        }
    }
}

// Serde sees only two of the three states: a present key deserializes to
// `Set` or (on `null`) `Clear`; `Keep` comes from `#[serde(default)]` on
// the containing struct when the key is absent.
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}

// ---------------------------------------------------------------------------
// Section patches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationPatch {
    pub city: Patch<String>,
    pub state: Patch<String>,
    pub country: Patch<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VenuePatch {
    pub name: Patch<String>,
    pub address: Patch<String>,
    pub phone: Patch<String>,
    pub website: Patch<String>,
    pub capacity: Patch<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialsPatch {
    pub guarantee: Patch<f64>,
    pub bonus: Patch<String>,
    pub deal_notes: Patch<String>,
    pub currency: Patch<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyerPatch {
    pub company: Patch<String>,
    pub office_address: Patch<String>,
    pub signatory_name: Patch<String>,
    pub signatory_phone: Patch<String>,
    pub signatory_email: Patch<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TravelPatch {
    pub hotel: Patch<String>,
    pub flights: Patch<String>,
    pub ground: Patch<String>,
}

// ---------------------------------------------------------------------------
// ShowPatch
// ---------------------------------------------------------------------------

/// Partial update for one show. Scoping keys (`orgId`, `tourId`,
/// `artistId`) and store-assigned fields are not addressable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShowPatch {
    pub status: Patch<ShowStatus>,
    pub date: Patch<DateTime<Utc>>,
    pub door_time: Patch<String>,
    pub set_time: Patch<String>,
    pub curfew: Patch<String>,
    pub location: Patch<LocationPatch>,
    pub venue: Patch<VenuePatch>,
    pub financials: Patch<FinancialsPatch>,
    pub buyer: Patch<BuyerPatch>,
    pub production: Patch<Vec<CrewMember>>,
    pub attachments: Patch<Vec<Attachment>>,
    pub travel: Patch<TravelPatch>,
    pub notes: Patch<String>,
}

impl ShowPatch {
    /// True when the patch mentions nothing. The gateway still refreshes
    /// `updated_at` for an empty patch.
    pub fn is_empty(&self) -> bool {
        self.status.is_keep()
            && self.date.is_keep()
            && self.door_time.is_keep()
            && self.set_time.is_keep()
            && self.curfew.is_keep()
            && self.location.is_keep()
            && self.venue.is_keep()
            && self.financials.is_keep()
            && self.buyer.is_keep()
            && self.production.is_keep()
            && self.attachments.is_keep()
            && self.travel.is_keep()
            && self.notes.is_keep()
    }

    /// Produce the patched record, leaving every unmentioned field of
    /// `show` untouched. The result is re-validated against the show
    /// invariants before it is returned.
    pub fn apply(&self, show: &Show) -> Result<Show, CoreError> {
        let mut next = show.clone();

        self.status.apply_required(&mut next.status, "status")?;
        self.date.apply_required(&mut next.date, "date")?;
        self.door_time.apply_optional(&mut next.door_time);
        self.set_time.apply_optional(&mut next.set_time);
        self.curfew.apply_optional(&mut next.curfew);
        self.notes.apply_optional(&mut next.notes);

        match &self.location {
            Patch::Keep => {}
            Patch::Clear => {
                return Err(CoreError::Validation(
                    "`location` is required and cannot be cleared".to_string(),
                ));
            }
            Patch::Set(patch) => {
                patch.city.apply_required(&mut next.location.city, "location.city")?;
                patch.state.apply_required(&mut next.location.state, "location.state")?;
                patch
                    .country
                    .apply_required(&mut next.location.country, "location.country")?;
            }
        }

        match &self.venue {
            Patch::Keep => {}
            Patch::Clear => {
                return Err(CoreError::Validation(
                    "`venue` is required and cannot be cleared".to_string(),
                ));
            }
            Patch::Set(patch) => {
                patch.name.apply_required(&mut next.venue.name, "venue.name")?;
                patch
                    .address
                    .apply_required(&mut next.venue.address, "venue.address")?;
                patch.phone.apply_optional(&mut next.venue.phone);
                patch.website.apply_optional(&mut next.venue.website);
                patch.capacity.apply_optional(&mut next.venue.capacity);
            }
        }

        match &self.financials {
            Patch::Keep => {}
            Patch::Clear => {
                return Err(CoreError::Validation(
                    "`financials` is required and cannot be cleared".to_string(),
                ));
            }
            Patch::Set(patch) => {
                patch.guarantee.apply_optional(&mut next.financials.guarantee);
                patch.bonus.apply_optional(&mut next.financials.bonus);
                patch
                    .deal_notes
                    .apply_optional(&mut next.financials.deal_notes);
                patch
                    .currency
                    .apply_required(&mut next.financials.currency, "financials.currency")?;
            }
        }

        match &self.buyer {
            Patch::Keep => {}
            Patch::Clear => next.buyer = None,
            Patch::Set(patch) => {
                if next.buyer.is_none() {
                    // Adding a buyer to a show that had none requires the
                    // one required field up front.
                    let Patch::Set(company) = &patch.company else {
                        return Err(CoreError::Validation(
                            "`buyer.company` is required when adding a buyer".to_string(),
                        ));
                    };
                    next.buyer = Some(Buyer {
                        company: company.clone(),
                        office_address: None,
                        signatory_name: None,
                        signatory_phone: None,
                        signatory_email: None,
                    });
                }
                if let Some(buyer) = next.buyer.as_mut() {
                    patch.company.apply_required(&mut buyer.company, "buyer.company")?;
                    patch.office_address.apply_optional(&mut buyer.office_address);
                    patch.signatory_name.apply_optional(&mut buyer.signatory_name);
                    patch.signatory_phone.apply_optional(&mut buyer.signatory_phone);
                    patch.signatory_email.apply_optional(&mut buyer.signatory_email);
                }
            }
        }

        match &self.production {
            Patch::Keep => {}
            Patch::Clear => {
                return Err(CoreError::Validation(
                    "`production` is never null; send an empty list instead".to_string(),
                ));
            }
            Patch::Set(crew) => next.production = crew.clone(),
        }

        match &self.attachments {
            Patch::Keep => {}
            Patch::Clear => {
                return Err(CoreError::Validation(
                    "`attachments` is never null; send an empty list instead".to_string(),
                ));
            }
            Patch::Set(attachments) => next.attachments = attachments.clone(),
        }

        match &self.travel {
            Patch::Keep => {}
            Patch::Clear => next.travel = None,
            Patch::Set(patch) => {
                let travel = next.travel.get_or_insert_with(Travel::default);
                patch.hotel.apply_optional(&mut travel.hotel);
                patch.flights.apply_optional(&mut travel.flights);
                patch.ground.apply_optional(&mut travel.ground);
            }
        }

        next.validate()?;
        Ok(next)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
