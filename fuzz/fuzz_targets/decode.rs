#![no_main]

use libfuzzer_sys::fuzz_target;
use resize_once::{config::ResizeConfig, run};
use resize_once_fuzz::InMemoryFetcher;

// Arbitrary response bodies must produce an error or a file, never a panic.
fuzz_target!(|body: Vec<u8>| {
    let temp_directory = tempfile::tempdir().expect("failed to create temporary directory");
    let config = ResizeConfig {
        url: "http://fuzz.test/body".to_owned(),
        width: 32,
        height: 32,
        stretch: false,
        output_dir: temp_directory.path().to_path_buf(),
        timeout_secs: None,
    };

    match run(&config, &InMemoryFetcher(body)) {
        Ok(summary) => assert!(summary.path.exists()),
        Err(_) => assert_eq!(std::fs::read_dir(temp_directory.path()).unwrap().count(), 0),
    }
});
