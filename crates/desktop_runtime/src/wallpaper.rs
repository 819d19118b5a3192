//! Built-in wallpaper catalog.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A built-in wallpaper image.
pub struct Wallpaper {
    pub id: &'static str,
    pub name: &'static str,
    pub path: &'static str,
}

/// Wallpapers in cycle order. The first one is the default.
pub const WALLPAPERS: [Wallpaper; 7] = [
    Wallpaper {
        id: "forest",
        name: "Calm Forest",
        path: "/assets/wallpapers/calm-forest-landscape-under-clouds-hu.jpg",
    },
    Wallpaper {
        id: "apple",
        name: "Apple CNY",
        path: "/assets/wallpapers/apple-chinese-new-year-mac-mt.jpg",
    },
    Wallpaper {
        id: "ghost",
        name: "Ghost",
        path: "/assets/wallpapers/ghost-ol.jpg",
    },
    Wallpaper {
        id: "chamonix",
        name: "Chamonix Mountains",
        path: "/assets/wallpapers/chamonix-mountains-5k-ih.jpg",
    },
    Wallpaper {
        id: "pilot-pikachu",
        name: "Pilot Pikachu",
        path: "/assets/wallpapers/pilot-pikachu-journey-ar.jpg",
    },
    Wallpaper {
        id: "pikachu-fireworks",
        name: "Pikachu Fireworks",
        path: "/assets/wallpapers/pikachu-seeing-fireworks-9r.jpg",
    },
    Wallpaper {
        id: "pikachu-horizon",
        name: "Pikachu Horizon",
        path: "/assets/wallpapers/pikachu-beyond-the-horizon-42.jpg",
    },
];

/// Wallpaper at `index`, wrapping out-of-range indices.
pub fn wallpaper_at(index: usize) -> Wallpaper {
    WALLPAPERS[index % WALLPAPERS.len()]
}

/// Index of the wallpaper stored at `path`. Unknown paths fall back to the first wallpaper.
pub fn index_for_path(path: &str) -> usize {
    WALLPAPERS
        .iter()
        .position(|wallpaper| wallpaper.path == path)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stored_paths_resolve_back_to_their_index() {
        for (index, wallpaper) in WALLPAPERS.iter().enumerate() {
            assert_eq!(index_for_path(wallpaper.path), index);
        }
        assert_eq!(index_for_path("/assets/wallpapers/missing.jpg"), 0);
    }

    #[test]
    fn indices_wrap() {
        assert_eq!(wallpaper_at(7).id, "forest");
        assert_eq!(wallpaper_at(9).name, "Ghost");
    }
}
