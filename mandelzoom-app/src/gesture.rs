use std::str::FromStr;

use crate::error::AppError;
use crate::selection::Selection;

/// One scripted user interaction for the headless driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Press at `from`, drag to `to`, release.
    Drag { from: (i32, i32), to: (i32, i32) },
    /// Secondary-button press: back to the default window.
    Reset,
}

impl Gesture {
    /// Replay a drag the way a surface would feed it to the controller.
    pub fn selection(&self) -> Option<Selection> {
        match *self {
            Self::Drag { from, to } => {
                let mut s = Selection::press(from.0, from.1);
                s.drag_to(to.0, to.1);
                Some(s)
            }
            Self::Reset => None,
        }
    }
}

impl FromStr for Gesture {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("reset") {
            return Ok(Self::Reset);
        }
        let coords = s
            .split(',')
            .map(|part| part.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| AppError::Usage(s.to_string()))?;
        match coords[..] {
            [x0, y0, x1, y1] => Ok(Self::Drag {
                from: (x0, y0),
                to: (x1, y1),
            }),
            _ => Err(AppError::Usage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_drags_and_resets() {
        assert_eq!(
            "100, 120,300,-4".parse::<Gesture>().unwrap(),
            Gesture::Drag {
                from: (100, 120),
                to: (300, -4)
            }
        );
        assert_eq!("RESET".parse::<Gesture>().unwrap(), Gesture::Reset);
    }

    #[test]
    fn rejects_malformed_gestures() {
        for bad in ["", "1,2,3", "1,2,3,4,5", "a,b,c,d", "zoom"] {
            assert!(
                matches!(bad.parse::<Gesture>(), Err(AppError::Usage(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn drag_replays_as_a_square_selection() {
        let g: Gesture = "0,0,50,20".parse().unwrap();
        let rect = g.selection().unwrap().release();
        assert_eq!((rect.width(), rect.height()), (20, 20));
        assert!(Gesture::Reset.selection().is_none());
    }
}
