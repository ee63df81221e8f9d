//! Built-in maker code table for GBA / DS / DSi headers.
//!
//! GBA (0xB0-0xB1), DS and DSi (0x010-0x011) all store the publisher as a
//! 2-character ASCII "new licensee" code. The table below covers the codes
//! seen on handheld releases; users can extend or override it through the
//! `[makers]` settings table.
//!
//! Sources: GBATEK (GBA/DS), Pan Docs (shared new-licensee list).

use cartdex_core::MakerCodes;

const MAKER_CODES: &[(&str, &str)] = &[
    ("01", "Nintendo"),
    ("08", "Capcom"),
    ("0A", "Jaleco"),
    ("13", "Electronic Arts"),
    ("18", "Hudson Soft"),
    ("1P", "Creatures"),
    ("20", "Destination Software"),
    ("28", "Kemco Japan"),
    ("29", "Seta"),
    ("30", "Viacom"),
    ("31", "Nintendo"),
    ("32", "Bandai"),
    ("33", "Ocean/Acclaim"),
    ("34", "Konami"),
    ("37", "Taito"),
    ("39", "Banpresto"),
    ("41", "Ubisoft"),
    ("42", "Atlus"),
    ("49", "Irem"),
    ("4F", "Eidos"),
    ("4Q", "Disney Interactive"),
    ("4Z", "Crave Entertainment"),
    ("50", "Absolute"),
    ("51", "Acclaim"),
    ("52", "Activision"),
    ("54", "Take-Two Interactive"),
    ("5D", "Midway"),
    ("5G", "Majesco"),
    ("5S", "Xicat Interactive"),
    ("60", "Titus"),
    ("64", "LucasArts"),
    ("69", "Electronic Arts"),
    ("6E", "Sega"),
    ("6K", "UFO Interactive"),
    ("6V", "JoWooD"),
    ("70", "Infogrames"),
    ("71", "Interplay"),
    ("78", "THQ"),
    ("7D", "Vivendi"),
    ("7F", "Kemco"),
    ("7J", "Zoo Digital"),
    ("82", "Namco"),
    ("8P", "Sega"),
    ("91", "Chunsoft"),
    ("99", "Marvelous Interactive"),
    ("9B", "Tecmo"),
    ("A4", "Konami"),
    ("AF", "Namco"),
    ("B2", "Bandai"),
    ("B4", "Enix"),
    ("BB", "Sunsoft"),
    ("C8", "Koei"),
    ("E9", "Natsume"),
    ("EB", "Atlus"),
    ("FH", "Foreign Media Games"),
    ("FR", "dtp young entertainment"),
    ("GD", "Square Enix"),
    ("GN", "Oxygen Interactive"),
    ("GT", "505 Games"),
    ("GY", "The Game Factory"),
    ("H4", "SNK Playmore"),
    ("HF", "Level-5"),
    ("HY", "Sega Toys"),
    ("KR", "Krea Medie"),
    ("LH", "Trend Verlag"),
    ("NB", "Bandai Namco"),
    ("NK", "Neko Entertainment"),
    ("NP", "Nobilis"),
    ("PL", "Plato"),
    ("QH", "D3 Publisher"),
    ("RT", "RTL Games"),
    ("SQ", "Square Enix"),
    ("TK", "Tasuke / Works"),
    ("WR", "Warner Bros."),
    ("XS", "Aksys Games"),
];

/// Build the default maker code table.
pub fn builtin_maker_codes() -> MakerCodes {
    MakerCodes::from_pairs(MAKER_CODES.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_resolves_common_publishers() {
        let table = builtin_maker_codes();
        assert_eq!(table.resolve("01"), "Nintendo");
        assert_eq!(table.resolve("78"), "THQ");
        assert_eq!(table.resolve("A4"), "Konami");
        assert_eq!(table.resolve("ZZ"), "Code ZZ");
    }

    #[test]
    fn builtin_table_has_unique_codes() {
        let mut codes: Vec<&str> = MAKER_CODES.iter().map(|(c, _)| *c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), MAKER_CODES.len());
    }
}
