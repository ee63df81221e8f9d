use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cartdex_lib::Platform;

pub(crate) fn run_list() {
    println!("Supported consoles:");
    println!();

    for platform in Platform::all() {
        println!(
            "  {} [{}]{}",
            platform.short_name().if_supports_color(Stdout, |t| t.bold()),
            platform.display_name().if_supports_color(Stdout, |t| t.cyan()),
            if platform.gametdb_segment().is_some() {
                format!(" {}", "(GameTDB)".if_supports_color(Stdout, |t| t.green()))
            } else {
                String::new()
            },
        );
        println!("    Extensions: {}", platform.file_extensions().join(", "));
        println!("    Folder names: {}", platform.aliases().join(", "));
        println!("    Listing: dbnames/{}.dat", platform.short_name());
    }
}
