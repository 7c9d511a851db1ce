//! Tests for command-line parsing and batch file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use wavetile::analysis::adjacency::UnobservedPolicy;
    use wavetile::io::cli::{Cli, FileProcessor};
    use wavetile::io::text::read_grid;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wavetile").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["island.txt"]);
        assert_eq!(cli.target, PathBuf::from("island.txt"));
        assert_eq!((cli.width, cli.height, cli.count), (60, 60, 1));
        assert_eq!(cli.seed, None);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
        assert_eq!(cli.log_level(), log::LevelFilter::Info);
        assert_eq!(cli.unobserved_policy(), UnobservedPolicy::Forbid);
    }

    #[test]
    fn test_flags() {
        let cli = parse(&[
            "maps", "-w", "12", "-H", "8", "-s", "5", "-c", "3", "--png", "--allow-unobserved",
            "-n", "-q",
        ]);
        assert_eq!((cli.width, cli.height, cli.count), (12, 8, 3));
        assert!(cli.png);
        assert!(!cli.skip_existing());
        assert!(!cli.should_show_progress());
        assert_eq!(cli.log_level(), log::LevelFilter::Warn);
        assert_eq!(cli.unobserved_policy(), UnobservedPolicy::Ignore);
        assert_eq!(parse(&["maps", "-v"]).log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_seed_is_offset_per_map() {
        let cli = parse(&["island.txt", "--seed", "10"]);
        assert_eq!(cli.generation_config(0).seed, Some(10));
        assert_eq!(cli.generation_config(2).seed, Some(12));
        assert_eq!(parse(&["island.txt"]).generation_config(1).seed, None);
    }

    #[test]
    fn test_output_paths() {
        let input = Path::new("maps/island.txt");
        assert_eq!(
            FileProcessor::get_output_path(input, 0, 1),
            PathBuf::from("maps/island_generated.txt")
        );
        assert_eq!(
            FileProcessor::get_output_path(input, 1, 3),
            PathBuf::from("maps/island_generated_2.txt")
        );
    }

    #[test]
    fn test_process_directory_writes_generated_maps() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("island.txt"), "W;W;G\nW;G;S\nG;S;S\n").expect("fixture");
        std::fs::write(dir.path().join("notes.md"), "ignored").expect("fixture");
        std::fs::write(dir.path().join("empty.txt"), "").expect("fixture");

        let target = dir.path().to_string_lossy().to_string();
        let cli = parse(&[target.as_str(), "-w", "6", "-H", "5", "-s", "1", "-c", "2", "--png", "-q"]);
        FileProcessor::new(cli).process().expect("processing succeeds");

        for n in 1..=2 {
            let output = dir.path().join(format!("island_generated_{n}.txt"));
            let grid = read_grid(&output).expect("output written");
            assert_eq!((grid.width(), grid.height()), (6, 5));
            assert!(grid.labels().iter().all(|l| ["W", "G", "S"].contains(&l.as_str())));
            assert!(output.with_extension("png").exists());
        }
        assert!(!dir.path().join("empty_generated_1.txt").exists());
    }

    #[test]
    fn test_existing_output_is_skipped() {
        let dir = TempDir::new().expect("temp dir");
        let input = dir.path().join("island.txt");
        std::fs::write(&input, "A;B\nB;A\n").expect("fixture");
        let output = dir.path().join("island_generated.txt");
        std::fs::write(&output, "keep").expect("fixture");

        let target = input.to_string_lossy().to_string();
        FileProcessor::new(parse(&[target.as_str(), "-q"]))
            .process()
            .expect("processing succeeds");
        assert_eq!(std::fs::read_to_string(&output).expect("still there"), "keep");

        FileProcessor::new(parse(&[target.as_str(), "-q", "-n", "-w", "3", "-H", "3"]))
            .process()
            .expect("processing succeeds");
        assert_ne!(std::fs::read_to_string(&output).expect("rewritten"), "keep");
    }

    #[test]
    fn test_non_grid_target_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let input = dir.path().join("island.png");
        std::fs::write(&input, "not a grid").expect("fixture");
        let target = input.to_string_lossy().to_string();
        assert!(FileProcessor::new(parse(&[target.as_str(), "-q"])).process().is_err());
    }
}
