use super::types::{Rejection, Validity};
use crate::model::{HistoryRecord, Location};

/// Nombre de gardes récentes examinées.
pub const RECENT_WINDOW: usize = 3;

/// Refuse un poste ou un créneau déjà tenu lors des trois dernières gardes.
///
/// `history` est trié du plus récent au plus ancien. Le poste est testé avant
/// le créneau pour chaque garde ; la première répétition trouvée donne le motif.
pub fn check_validity(history: &[HistoryRecord], location: Location, slot_id: u8) -> Validity {
    for record in history.iter().take(RECENT_WINDOW) {
        if record.location == location {
            return Validity::Invalid(Rejection::RecentLocation(location));
        }
        if record.slot_id == slot_id {
            return Validity::Invalid(Rejection::RecentSlot(slot_id));
        }
    }
    Validity::Valid
}
