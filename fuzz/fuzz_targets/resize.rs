#![no_main]

use std::num::NonZeroU8;

use image::GenericImageView;
use libfuzzer_sys::fuzz_target;
use resize_once::{config::ResizeConfig, policy::ResizePolicy, run};
use resize_once_fuzz::{InMemoryFetcher, StructuredImage};

fuzz_target!(|input: (StructuredImage, NonZeroU8, NonZeroU8, bool)| {
    let (image, box_width, box_height, stretch) = input;
    let (box_width, box_height) = (box_width.get() as u32, box_height.get() as u32);
    let (source_width, source_height) = (image.width.get() as u32, image.height.get() as u32);

    let temp_directory = tempfile::tempdir().expect("failed to create temporary directory");
    let config = ResizeConfig {
        url: "http://fuzz.test/input.png".to_owned(),
        width: box_width,
        height: box_height,
        stretch,
        output_dir: temp_directory.path().to_path_buf(),
        timeout_secs: None,
    };

    let summary = run(&config, &InMemoryFetcher(image.to_png())).expect("pipeline failed");
    let (width, height) = image::open(&summary.path)
        .expect("could not open the output file")
        .dimensions();
    assert_eq!((width, height), (summary.width, summary.height));

    match summary.policy {
        ResizePolicy::NoResize => {
            assert_eq!((source_width, source_height), (box_width, box_height));
            assert_eq!((width, height), (source_width, source_height));
        }
        ResizePolicy::Stretch => {
            assert!(stretch);
            assert_eq!((width, height), (box_width, box_height));
        }
        ResizePolicy::Fit => {
            assert!(!stretch);
            assert!(width <= box_width && height <= box_height);
            // at least one side touches the box
            assert!(width == box_width || height == box_height);
        }
    }
});
