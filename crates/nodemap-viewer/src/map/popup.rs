use smallvec::SmallVec;

use crate::map::model::MapModel;

#[derive(Debug, Clone, PartialEq)]
pub struct PopupEntry {
    pub address: String,
    pub country: String,
    pub city: Option<String>,
    pub href: String,
}

impl PopupEntry {
    /// `country` or `country - city`.
    pub fn heading(&self) -> String {
        match self.city.as_deref() {
            Some(city) => format!("{} - {}", self.country, city),
            None => self.country.clone(),
        }
    }
}

/// Indices of every placed node at exactly the same lat/lng as `idx`,
/// `idx` included, in list order.
pub fn colocated(model: &MapModel, idx: usize) -> SmallVec<[usize; 4]> {
    let Some(anchor) = model.location(idx) else {
        return SmallVec::new();
    };
    model
        .placed()
        .filter(|(_, _, loc)| loc.same_position(anchor))
        .map(|(i, _, _)| i)
        .collect()
}

pub fn popup_entries(model: &MapModel, idx: usize) -> Vec<PopupEntry> {
    colocated(model, idx)
        .into_iter()
        .filter_map(|i| {
            let node = model.node(i)?;
            let loc = node.location.as_ref()?;
            Some(PopupEntry {
                address: node.address.clone(),
                country: loc.country.clone(),
                city: loc.city().map(str::to_string),
                href: node.info_url(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::model::fixtures::*;
    use nodemap_core::ApiResponse;

    fn shared_spot() -> MapModel {
        let mut lone = loc(5.0, 5.0);
        lone.city = None;
        MapModel::from_response(ApiResponse {
            network: "n".to_string(),
            nodes: vec![
                node("1.1.1.1", &[], Some(loc(5.0, 5.0))),
                node("2.2.2.2", &[], None),
                node("3.3.3.3", &["1.1.1.1"], Some(lone)),
                node("4.4.4.4", &[], Some(loc(5.0, 5.000_001))),
            ],
        })
    }

    #[test]
    fn either_marker_lists_both_colocated_nodes() {
        let model = shared_spot();
        assert_eq!(colocated(&model, 0).as_slice(), &[0, 2]);
        assert_eq!(colocated(&model, 2).as_slice(), &[0, 2]);
        assert_eq!(colocated(&model, 3).as_slice(), &[3]);
    }

    #[test]
    fn unplaced_node_has_no_popup() {
        let model = shared_spot();
        assert!(colocated(&model, 1).is_empty());
        assert!(popup_entries(&model, 1).is_empty());
    }

    #[test]
    fn entries_carry_heading_and_info_link() {
        let model = shared_spot();
        let entries = popup_entries(&model, 0);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].heading(), "Testland - Testville");
        assert_eq!(entries[0].href, "http://1.1.1.1:20443/v2/info");
        assert_eq!(entries[1].heading(), "Testland");
        assert_eq!(entries[1].address, "3.3.3.3");
    }
}
