use crate::models::rom::RomInfo;
use crate::naming::split_extension;

pub const UNKNOWN_SYSTEM: &str = "Unknown";
const UNKNOWN_NAME: &str = "Unknown ROM";

pub struct KnownRom {
    pub key: &'static str,
    pub name: &'static str,
    pub system: &'static str,
}

const fn rom(key: &'static str, name: &'static str, system: &'static str) -> KnownRom {
    KnownRom { key, name, system }
}

/// Matched in declaration order; the first key found in a filename wins,
/// so longer titles go ahead of their prefixes.
pub static KNOWN_ROMS: &[KnownRom] = &[
    rom("super-mario-bros-3.nes", "Super Mario Bros 3", "NES"),
    rom("super-mario-bros.nes", "Super Mario Bros", "NES"),
    rom("zelda-link-to-the-past.sfc", "The Legend of Zelda: A Link to the Past", "SNES"),
    rom("zelda.nes", "The Legend of Zelda", "NES"),
    rom("metroid.nes", "Metroid", "NES"),
    rom("mega-man-2.nes", "Mega Man 2", "NES"),
    rom("tetris.gb", "Tetris", "Game Boy"),
    rom("pokemon-red.gb", "Pokemon Red", "Game Boy"),
    rom("pokemon-gold.gbc", "Pokemon Gold", "Game Boy Color"),
    rom("pokemon-emerald.gba", "Pokemon Emerald", "Game Boy Advance"),
    rom("super-mario-world.smc", "Super Mario World", "SNES"),
    rom("sonic-the-hedgehog.md", "Sonic the Hedgehog", "Sega Genesis"),
    rom("streets-of-rage-2.gen", "Streets of Rage 2", "Sega Genesis"),
    rom("pitfall.a26", "Pitfall!", "Atari 2600"),
];

/// Best-effort name and system for a ROM, from its filename alone.
/// Never fails; unmatched names get a title-cased display name and an
/// `Unknown` system. Names with nothing alphanumeric show as `Unknown ROM`.
pub fn identify(filename: &str) -> RomInfo {
    let lowered = filename.to_lowercase();
    for known in KNOWN_ROMS {
        let (key, _) = split_extension(known.key);
        if lowered.contains(key) {
            return RomInfo { name: known.name.to_string(), system: known.system.to_string() };
        }
    }

    let (stem, _) = split_extension(filename);
    let name = title_case(stem);
    RomInfo {
        name: if name.chars().any(char::is_alphanumeric) { name } else { UNKNOWN_NAME.to_string() },
        system: UNKNOWN_SYSTEM.to_string(),
    }
}

fn title_case(stem: &str) -> String {
    let spaced: String = stem
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();
    spaced
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn info(name: &str, system: &str) -> RomInfo {
        RomInfo { name: name.into(), system: system.into() }
    }

    #[test]
    fn matches_substring_of_known_key() {
        assert_eq!(identify("my-super-mario-bros-rip.nes"), info("Super Mario Bros", "NES"));
        assert_eq!(identify("zelda.nes"), info("The Legend of Zelda", "NES"));
        assert_eq!(identify("POKEMON-GOLD (USA).gbc"), info("Pokemon Gold", "Game Boy Color"));
    }

    #[test]
    fn first_declared_entry_wins() {
        assert_eq!(identify("super-mario-bros-3.nes"), info("Super Mario Bros 3", "NES"));
        assert_eq!(identify("zelda-link-to-the-past.sfc").system, "SNES");
    }

    #[test]
    fn falls_back_to_title_case() {
        assert_eq!(identify("unknown_game_123.nes"), info("Unknown Game 123", "Unknown"));
        assert_eq!(identify("castle--vania__II.nes"), info("Castle Vania II", "Unknown"));
        assert_eq!(identify("homebrew"), info("Homebrew", "Unknown"));
    }

    #[test]
    fn never_returns_empty_name() {
        for input in ["", ".", "---", "__.gb", ".nes", "!!!.gba"] {
            let got = identify(input);
            assert!(!got.name.is_empty(), "{input:?}");
            assert_eq!(got.system, UNKNOWN_SYSTEM);
        }
        assert_eq!(identify("!!!.gba").name, UNKNOWN_NAME);
        assert_eq!(identify("").name, UNKNOWN_NAME);
    }

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<_> = KNOWN_ROMS.iter().map(|k| k.key).collect();
        assert_eq!(keys.len(), KNOWN_ROMS.len());
    }
}
