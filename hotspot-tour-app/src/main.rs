mod app;
mod app_dir;
mod app_state;
mod fade;
mod image_loader;
mod input;
mod preferences;
mod ui;
mod viewer_bridge;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "hotspot-tour")]
#[command(author, version, about)]
#[command(long_about = "Interactive image tours with clickable hotspot regions.\n\n\
    Without a tour file the last opened tour is reopened, then tour.json\n\
    next to the executable.\n\n\
    Examples:\n  \
    hotspot-tour server.json            Open a tour\n  \
    hotspot-tour server.json --slide 3  Start on the third slide\n  \
    hotspot-tour server.json --autoplay Start the auto tour right away")]
pub(crate) struct Cli {
    /// Tour JSON file to open
    pub(crate) tour: Option<PathBuf>,

    /// Start on a specific slide (1-indexed)
    #[arg(long)]
    pub(crate) slide: Option<usize>,

    /// Start the auto tour once the tour is loaded
    #[arg(long)]
    pub(crate) autoplay: bool,
}

fn main() -> eframe::Result {
    app::run(Cli::parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_tour_and_flags() {
        let cli = Cli::parse_from(["hotspot-tour", "server.json", "--slide", "3", "--autoplay"]);
        assert_eq!(cli.tour, Some(PathBuf::from("server.json")));
        assert_eq!(cli.slide, Some(3));
        assert!(cli.autoplay);

        let cli = Cli::parse_from(["hotspot-tour"]);
        assert!(cli.tour.is_none());
        assert!(!cli.autoplay);
    }
}
