use std::fmt;
use std::str::FromStr;

use fitpath_db::models::ParseEnumError;

/// The screen the user is on.
///
/// Valid transitions:
///
/// ```text
/// onboarding -> dashboard   (profile submitted)
/// dashboard  -> review      (end day)
/// review     -> dashboard   (next day)
/// dashboard  -> onboarding  (edit profile)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Onboarding,
    Dashboard,
    Review,
}

impl View {
    pub fn is_valid_transition(from: View, to: View) -> bool {
        matches!(
            (from, to),
            (View::Onboarding, View::Dashboard)
                | (View::Dashboard, View::Review)
                | (View::Review, View::Dashboard)
                | (View::Dashboard, View::Onboarding)
        )
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Onboarding => "onboarding",
            Self::Dashboard => "dashboard",
            Self::Review => "review",
        };
        f.write_str(s)
    }
}

impl FromStr for View {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "onboarding" => Ok(Self::Onboarding),
            "dashboard" => Ok(Self::Dashboard),
            "review" => Ok(Self::Review),
            _ => Err(ParseEnumError::new("view", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [View; 3] = [View::Onboarding, View::Dashboard, View::Review];

    #[test]
    fn valid_transitions() {
        assert!(View::is_valid_transition(View::Onboarding, View::Dashboard));
        assert!(View::is_valid_transition(View::Dashboard, View::Review));
        assert!(View::is_valid_transition(View::Review, View::Dashboard));
        assert!(View::is_valid_transition(View::Dashboard, View::Onboarding));
    }

    #[test]
    fn invalid_transitions() {
        assert!(!View::is_valid_transition(View::Onboarding, View::Review));
        assert!(!View::is_valid_transition(View::Review, View::Onboarding));
        for view in ALL {
            assert!(!View::is_valid_transition(view, view), "{view} -> {view}");
        }
    }

    #[test]
    fn display_roundtrip() {
        for view in ALL {
            assert_eq!(view.to_string().parse::<View>().unwrap(), view);
        }
        assert!("settings".parse::<View>().is_err());
    }
}
