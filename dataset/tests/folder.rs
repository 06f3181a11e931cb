use annot::{BaseConvention, BoxFormat, ClassLabel};
use dataset::Folder;
use std::{fs, path::Path};

fn format(tag: &str) -> BoxFormat {
    tag.parse().unwrap()
}

/// PNG signature plus an IHDR chunk, enough for header-only size probing.
fn tiny_png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    bytes.extend(13u32.to_be_bytes());
    bytes.extend(b"IHDR");
    bytes.extend(width.to_be_bytes());
    bytes.extend(height.to_be_bytes());
    bytes.extend([8, 2, 0, 0, 0]);
    bytes.extend(0u32.to_be_bytes());
    bytes
}

fn write(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

#[test]
fn paired_yolo_labels() {
    let root = tempfile::tempdir().unwrap();
    let image_dir = root.path().join("images");
    let label_dir = root.path().join("labels");
    fs::create_dir_all(&image_dir).unwrap();
    fs::create_dir_all(&label_dir).unwrap();

    fs::write(image_dir.join("a.png"), tiny_png(100, 100)).unwrap();
    fs::write(image_dir.join("b.png"), tiny_png(100, 100)).unwrap();
    fs::write(image_dir.join("c.png"), tiny_png(100, 100)).unwrap();
    write(&label_dir.join("a.txt"), "0 25 40 30 40\n");
    write(&label_dir.join("b.txt"), "1 5 5 10 10\n2 50 50 20 20\n");

    let folder = Folder::load(&image_dir, &label_dir, format("cxcywhc"), true).unwrap();

    assert_eq!(folder.image_annotations.len(), 3);
    assert_eq!(folder.num_annotated(), 2);

    let annotations = folder.image_annotations[&image_dir.join("a.png")]
        .as_ref()
        .unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].coords(), [10.0, 20.0, 40.0, 60.0]);
    assert_eq!(
        annotations[0].class(),
        Some(&ClassLabel::Name("0".into()))
    );

    let annotations = folder.image_annotations[&image_dir.join("b.png")]
        .as_ref()
        .unwrap();
    assert_eq!(annotations.len(), 2);

    // c.png never received annotations.
    assert_eq!(folder.image_annotations[&image_dir.join("c.png")], None);
}

#[test]
fn paired_yolo_denormalizes_against_image_size() {
    let root = tempfile::tempdir().unwrap();
    let image_dir = root.path().join("images");
    let label_dir = root.path().join("labels");
    fs::create_dir_all(&image_dir).unwrap();
    fs::create_dir_all(&label_dir).unwrap();

    fs::write(image_dir.join("a.png"), tiny_png(100, 200)).unwrap();
    fs::write(image_dir.join("b.png"), tiny_png(100, 200)).unwrap();
    write(&label_dir.join("a.txt"), "0 0.5 0.5 0.5 0.5\n");
    write(&label_dir.join("b.txt"), "0 0.5 0.5 0.5 0.5 0.75\n");

    let folder = Folder::load(&image_dir, &label_dir, format("cxcywhncc"), true).unwrap();

    let annotations = folder.image_annotations[&image_dir.join("a.png")]
        .as_ref()
        .unwrap();
    assert_eq!(annotations[0].coords(), [25.0, 50.0, 75.0, 150.0]);
    assert_eq!(annotations[0].confidence(), None);

    let annotations = folder.image_annotations[&image_dir.join("b.png")]
        .as_ref()
        .unwrap();
    assert_eq!(annotations[0].confidence(), Some(&0.75));
}

#[test]
fn single_coco_json() {
    let root = tempfile::tempdir().unwrap();
    let image_dir = root.path().join("images");
    let annotation_dir = root.path().join("annotations");
    fs::create_dir_all(&image_dir).unwrap();
    fs::create_dir_all(&annotation_dir).unwrap();

    fs::write(image_dir.join("dog.png"), tiny_png(640, 480)).unwrap();
    fs::write(image_dir.join("empty.png"), tiny_png(640, 480)).unwrap();
    write(
        &annotation_dir.join("instances.json"),
        r#"{
            "images": [
                {"id": 1, "file_name": "dog.png", "width": 640, "height": 480},
                {"id": 2, "file_name": "empty.png", "width": 640, "height": 480}
            ],
            "annotations": [
                {"id": 10, "image_id": 1, "bbox": [10.0, 20.0, 30.0, 40.0], "category_id": 3},
                {"id": 11, "image_id": 99, "bbox": [0.0, 0.0, 1.0, 1.0], "category_id": 3}
            ],
            "categories": [{"id": 3, "name": "dog", "supercategory": "animal"}]
        }"#,
    );

    let folder = Folder::load(&image_dir, &annotation_dir, format("xywh"), true).unwrap();

    assert!(folder.class_map.is_some());
    let annotations = folder.image_annotations[&image_dir.join("dog.png")]
        .as_ref()
        .unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].coords(), [10.0, 20.0, 40.0, 60.0]);
    assert_eq!(annotations[0].class(), Some(&ClassLabel::Id(3)));
    assert_eq!(annotations[0].display_name().unwrap(), "dog");

    // The orphan annotation (image id 99) is skipped, and empty.png stays
    // unannotated.
    assert_eq!(folder.image_annotations[&image_dir.join("empty.png")], None);
}

#[test]
fn single_flat_csv() {
    let root = tempfile::tempdir().unwrap();
    let image_dir = root.path().join("images");
    let annotation_dir = root.path().join("annotations");
    fs::create_dir_all(&image_dir).unwrap();
    fs::create_dir_all(&annotation_dir).unwrap();

    fs::write(image_dir.join("img1.png"), tiny_png(64, 64)).unwrap();
    write(
        &annotation_dir.join("boxes.csv"),
        "img1.png,10,20,30,40,cat\nimg1.png,1,2,3,4,dog\nmissing.png,0,0,1,1,bird\nshort,row\n",
    );

    let folder = Folder::load(&image_dir, &annotation_dir, format("xywhc"), true).unwrap();

    let annotations = folder.image_annotations[&image_dir.join("img1.png")]
        .as_ref()
        .unwrap();
    assert_eq!(annotations.len(), 2);
    assert_eq!(annotations[0].coords(), [10.0, 20.0, 40.0, 60.0]);
    assert_eq!(
        annotations[0].class(),
        Some(&ClassLabel::Name("cat".into()))
    );
    assert_eq!(
        annotations[1].to(BaseConvention::Xywh).unwrap(),
        [1.0, 2.0, 3.0, 4.0],
    );
}

#[test]
fn single_flat_txt_splits_on_any_whitespace() {
    let root = tempfile::tempdir().unwrap();
    let image_dir = root.path().join("images");
    let annotation_dir = root.path().join("annotations");
    fs::create_dir_all(&image_dir).unwrap();
    fs::create_dir_all(&annotation_dir).unwrap();

    fs::write(image_dir.join("img1.png"), tiny_png(64, 64)).unwrap();
    write(
        &annotation_dir.join("boxes.txt"),
        "img1.png  10 20 30 40 cat\nimg1.png\t1\t2\t3\t4\tdog\nimg1.png 5 5 5 5 bird extra\n",
    );

    let folder = Folder::load(&image_dir, &annotation_dir, format("xywhc"), true).unwrap();

    let annotations = folder.image_annotations[&image_dir.join("img1.png")]
        .as_ref()
        .unwrap();
    assert_eq!(annotations.len(), 3);
    assert_eq!(annotations[0].coords(), [10.0, 20.0, 40.0, 60.0]);
    assert_eq!(
        annotations[1].class(),
        Some(&ClassLabel::Name("dog".into()))
    );
    // Trailing columns beyond the class are ignored.
    assert_eq!(
        annotations[2].class(),
        Some(&ClassLabel::Name("bird".into()))
    );
}

#[test]
fn non_recursive_discovery_skips_subdirectories() {
    let root = tempfile::tempdir().unwrap();
    let image_dir = root.path().join("images");
    let nested = image_dir.join("nested");
    let label_dir = root.path().join("labels");
    fs::create_dir_all(&nested).unwrap();
    fs::create_dir_all(&label_dir).unwrap();

    fs::write(image_dir.join("top.png"), tiny_png(10, 10)).unwrap();
    fs::write(nested.join("deep.png"), tiny_png(10, 10)).unwrap();
    write(&label_dir.join("top.txt"), "0 1 2 3 4\n");
    write(&label_dir.join("deep.txt"), "0 1 2 3 4\n");

    let flat_folder = Folder::load(&image_dir, &label_dir, format("xywhc"), false).unwrap();
    assert_eq!(flat_folder.image_annotations.len(), 1);

    let recursive_folder = Folder::load(&image_dir, &label_dir, format("xywhc"), true).unwrap();
    assert_eq!(recursive_folder.image_annotations.len(), 2);
    assert_eq!(recursive_folder.num_annotated(), 2);
}
