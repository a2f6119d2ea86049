use rand::Rng;

/// Longer originals are cut, so a title past this point is lost to
/// `original_hint`: the upload response may name a known ROM that the
/// listing later shows as unknown.
const MAX_SLUG_LEN: usize = 48;
const RANDOM_RANGE: u32 = 1_000_000_000;

/// Builds the on-disk name for an upload:
/// `<unix millis>-<random>-<slug><.ext>`.
///
/// Only digits, `[a-z0-9-]` and a lower-cased alphanumeric extension ever
/// reach the output, so it is always a bare filename. The slug keeps at most
/// `MAX_SLUG_LEN` characters of the original stem.
pub fn generate_stored_name(original: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let random: u32 = rand::thread_rng().gen_range(0..RANDOM_RANGE);
    let (stem, ext) = split_extension(original);
    let ext = ext
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();
    let slug = slugify(stem);
    if slug.is_empty() {
        format!("{timestamp}-{random}{ext}")
    } else {
        format!("{timestamp}-{random}-{slug}{ext}")
    }
}

/// Recovers the part of a stored name that came from the client, so that
/// identification can use it. Names not produced by `generate_stored_name`
/// come back unchanged.
pub fn original_hint(stored: &str) -> &str {
    let mut parts = stored.splitn(3, '-');
    let (Some(ts), Some(random)) = (parts.next(), parts.next()) else {
        return stored;
    };
    if ts.is_empty() || !ts.bytes().all(|b| b.is_ascii_digit()) {
        return stored;
    }
    let digits = random.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return stored;
    }
    match parts.next() {
        Some(rest) if digits == random.len() => rest,
        // short form `<ts>-<random>.ext`: nothing of the original survives
        None if random[digits..].is_empty() || random[digits..].starts_with('.') => "",
        _ => stored,
    }
}

/// Splits at the last `.`; a leading dot does not start an extension.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

fn slugify(stem: &str) -> String {
    let mut slug = String::with_capacity(stem.len().min(MAX_SLUG_LEN));
    for ch in stem.chars() {
        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rapid_successive_names_differ() {
        let names: HashSet<String> = (0..1000).map(|_| generate_stored_name("zelda.nes")).collect();
        assert_eq!(names.len(), 1000);
    }

    #[test]
    fn keeps_extension() {
        let name = generate_stored_name("Super Mario Bros.NES");
        assert!(name.ends_with("-super-mario-bros.nes"), "{name}");
        assert_eq!(split_extension(&name).1, Some("nes"));
    }

    #[test]
    fn output_is_a_bare_filename() {
        let name = generate_stored_name("../../etc/pass wd.gb");
        assert!(!name.contains('/') && !name.contains('\\'), "{name}");
        assert!(name.ends_with("-etc-pass-wd.gb"), "{name}");
    }

    #[test]
    fn drops_odd_extension() {
        let name = generate_stored_name("game.n/s");
        assert!(!name.contains('/'));
        let name = generate_stored_name("noext");
        assert!(name.ends_with("-noext"), "{name}");
    }

    #[test]
    fn empty_slug_uses_short_form() {
        let name = generate_stored_name("!!!.gba");
        let (stem, ext) = split_extension(&name);
        assert_eq!(ext, Some("gba"));
        assert_eq!(stem.split('-').count(), 2);
        assert_eq!(original_hint(&name), "");
    }

    #[test]
    fn hint_round_trips_generated_names() {
        let name = generate_stored_name("zelda.nes");
        assert_eq!(original_hint(&name), "zelda.nes");
        assert_eq!(original_hint("1700000000000-123-my-super-mario-bros-rip.nes"), "my-super-mario-bros-rip.nes");
    }

    #[test]
    fn hint_passes_foreign_names_through() {
        assert_eq!(original_hint("tetris.gb"), "tetris.gb");
        assert_eq!(original_hint("street-fighter-2.smc"), "street-fighter-2.smc");
        assert_eq!(original_hint("2048-clone.gba"), "2048-clone.gba");
    }

    #[test]
    fn slug_is_truncated() {
        let long = "a".repeat(200);
        let name = generate_stored_name(&format!("{long}.bin"));
        assert!(name.len() < 100);
        assert_eq!(original_hint(&name), format!("{}.bin", "a".repeat(MAX_SLUG_LEN)));
    }
}
