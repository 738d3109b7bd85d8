use contracts::domain::a008_motor_quote::QuoteStatus;

/// One entry of the per-row status menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMenuItem {
    pub label: &'static str,
    /// Status requested when the entry is picked; `None` for the locked marker
    pub target: Option<QuoteStatus>,
    pub disabled: bool,
}

/// Entries offered for a quote in `status`. A quote that can no longer
/// change shows a single disabled "Locked" entry.
pub fn status_menu(status: QuoteStatus) -> Vec<StatusMenuItem> {
    if status.is_locked() {
        return vec![StatusMenuItem {
            label: "Locked",
            target: None,
            disabled: true,
        }];
    }
    status
        .transitions()
        .iter()
        .map(|next| StatusMenuItem {
            label: next.label(),
            target: Some(*next),
            disabled: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_offers_cancel_and_approve() {
        let menu = status_menu(QuoteStatus::Pending);
        let targets: Vec<_> = menu.iter().map(|i| i.target).collect();
        assert_eq!(
            targets,
            vec![Some(QuoteStatus::Cancelled), Some(QuoteStatus::Approved)]
        );
        assert!(menu.iter().all(|i| !i.disabled));
    }

    #[test]
    fn test_decided_quotes_are_locked() {
        for status in [QuoteStatus::Approved, QuoteStatus::Cancelled] {
            let menu = status_menu(status);
            assert_eq!(menu.len(), 1);
            assert_eq!(menu[0].label, "Locked");
            assert!(menu[0].disabled);
            assert!(menu[0].target.is_none());
        }
    }
}
