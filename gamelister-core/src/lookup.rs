/// Code/name tables for the two catalog domains the lister filters on.
///
/// Both tables are `'static` slices kept in ascending code order. That order
/// is the table's natural order: name scans walk it front to back, and the
/// classifier relies on it when several search platforms match one record.

/// Sentinel returned when a name has no matching code.
///
/// Callers must treat it as "unresolved", never as a real code.
pub const UNKNOWN_CODE: u32 = 0;

/// Which lookup table to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Platform,
    Genre,
}

impl Domain {
    /// The table backing this domain.
    pub fn table(&self) -> &'static LookupTable {
        match self {
            Domain::Platform => platforms(),
            Domain::Genre => genres(),
        }
    }

    /// Lowercase label used in log output and counter names.
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Platform => "platform",
            Domain::Genre => "genre",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A read-only bidirectional mapping between numeric codes and display names.
#[derive(Debug)]
pub struct LookupTable {
    domain: Domain,
    entries: &'static [(u32, &'static str)],
}

impl LookupTable {
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Display name for a code, or `None` if the code is not in the table.
    pub fn name(&self, code: u32) -> Option<&'static str> {
        self.entries
            .binary_search_by_key(&code, |&(c, _)| c)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Code for a display name (case-insensitive).
    ///
    /// Scans in ascending code order and returns the first match, or
    /// [`UNKNOWN_CODE`] when nothing matches.
    pub fn code(&self, name: &str) -> u32 {
        let wanted = name.trim();
        self.entries
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(wanted))
            .map(|&(c, _)| c)
            .unwrap_or(UNKNOWN_CODE)
    }

    /// Display name for a code, falling back to the bare number for codes the
    /// table does not know.
    pub fn display(&self, code: u32) -> String {
        match self.name(code) {
            Some(name) => name.to_string(),
            None => code.to_string(),
        }
    }

    /// All `(code, name)` pairs in natural order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The platform table.
pub fn platforms() -> &'static LookupTable {
    &PLATFORMS
}

/// The genre table.
pub fn genres() -> &'static LookupTable {
    &GENRES
}

static PLATFORMS: LookupTable = LookupTable {
    domain: Domain::Platform,
    entries: &[
        (3, "Linux"),
        (4, "Nintendo 64"),
        (5, "Wii"),
        (6, "PC (Microsoft Windows)"),
        (7, "PlayStation"),
        (8, "PlayStation 2"),
        (9, "PlayStation 3"),
        (11, "Xbox"),
        (12, "Xbox 360"),
        (14, "Mac"),
        (18, "Nintendo Entertainment System (NES)"),
        (19, "Super Nintendo Entertainment System (SNES)"),
        (20, "Nintendo DS"),
        (21, "Nintendo GameCube"),
        (22, "Game Boy Color"),
        (23, "Dreamcast"),
        (24, "Game Boy Advance"),
        (29, "Sega Mega Drive/Genesis"),
        (32, "Sega Saturn"),
        (33, "Game Boy"),
        (34, "Android"),
        (35, "Sega Game Gear"),
        (37, "Nintendo 3DS"),
        (38, "PlayStation Portable"),
        (39, "iOS"),
        (41, "Wii U"),
        (46, "PlayStation Vita"),
        (48, "PlayStation 4"),
        (49, "Xbox One"),
        (64, "Sega Master System"),
        (82, "Web browser"),
        (92, "SteamOS"),
        (130, "Nintendo Switch"),
        (137, "New Nintendo 3DS"),
        (162, "Oculus VR"),
        (163, "SteamVR"),
        (165, "PlayStation VR"),
        (167, "PlayStation 5"),
        (169, "Xbox Series X|S"),
        (170, "Google Stadia"),
    ],
};

static GENRES: LookupTable = LookupTable {
    domain: Domain::Genre,
    entries: &[
        (2, "Point-and-click"),
        (4, "Fighting"),
        (5, "Shooter"),
        (7, "Music"),
        (8, "Platform"),
        (9, "Puzzle"),
        (10, "Racing"),
        (11, "Real Time Strategy (RTS)"),
        (12, "Role-playing (RPG)"),
        (13, "Simulator"),
        (14, "Sport"),
        (15, "Strategy"),
        (16, "Turn-based strategy (TBS)"),
        (24, "Tactical"),
        (25, "Hack and slash/Beat 'em up"),
        (26, "Quiz/Trivia"),
        (30, "Pinball"),
        (31, "Adventure"),
        (32, "Indie"),
        (33, "Arcade"),
        (34, "Visual Novel"),
        (35, "Card & Board Game"),
        (36, "MOBA"),
    ],
};
