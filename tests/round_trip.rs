//! Write records of every kind to disk and read them back.

use std::fmt::Debug;
use std::fs;

use bedspec::bed::{read_records, write_records, BedLine, BedReader, BedWriter};
use bedspec::bed_extension;
use bedspec::field::BedColor;
use bedspec::format::{Decode, Encode};
use bedspec::interval::Strand;
use bedspec::record::{
    AnyBed, Bed12, Bed2, Bed3, Bed4, Bed5, Bed6, BedGraph, BedPe, Extended, PairBed,
};

bed_extension! {
    #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Motif {
        motif: String,
        p_value: Option<u64>,
    }
}

bed_extension! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Tags {
        tags: Vec<String>,
    }
}

fn assert_round_trip<T>(records: Vec<T>)
where
    T: Decode + Encode + PartialEq + Debug,
{
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.bed");
    write_records(&path, &records).unwrap();
    let back: Vec<T> = read_records(&path).unwrap();
    assert_eq!(back, records);
}

#[test]
fn test_simple_kinds() {
    assert_round_trip(vec![
        Bed2::new("chr1", 0).unwrap(),
        Bed2::new("chr2", 99).unwrap(),
    ]);
    assert_round_trip(vec![
        Bed3::new("chr1", 0, 0).unwrap(),
        Bed3::new("chr1", 10, 20).unwrap(),
    ]);
    assert_round_trip(vec![
        Bed4::new("chr1", 1, 2, Some("a".to_string())).unwrap(),
        Bed4::new("chr1", 1, 2, None).unwrap(),
    ]);
    assert_round_trip(vec![
        Bed5::new("chr1", 1, 2, Some("a".to_string()), Some(960)).unwrap(),
        Bed5::new("chr1", 1, 2, None, None).unwrap(),
    ]);
    assert_round_trip(vec![
        Bed6::new("chr1", 1, 2, None, Some(0), Strand::Forward).unwrap(),
        Bed6::new("chrX", 5, 9, Some("b".to_string()), None, Strand::Unknown).unwrap(),
    ]);
}

#[test]
fn test_bed12() {
    assert_round_trip(vec![
        Bed12::new(
            "chr7",
            127_471_196,
            127_495_720,
            Some("Pos1".to_string()),
            Some(0),
            Strand::Forward,
            Some(127_471_196),
            Some(127_495_720),
            Some(BedColor::new(255, 0, 0)),
            Some(2),
            vec![4_000, 5_000],
            vec![0, 19_524],
        )
        .unwrap(),
        Bed12::new(
            "chr7",
            1,
            2,
            None,
            None,
            Strand::Unknown,
            None,
            None,
            None,
            None,
            vec![],
            vec![],
        )
        .unwrap(),
    ]);
}

#[test]
fn test_graph_and_pairs() {
    assert_round_trip(vec![
        BedGraph::new("chr1", 0, 100, 1.5).unwrap(),
        BedGraph::new("chr1", 100, 200, -0.25).unwrap(),
        BedGraph::new("chr1", 200, 300, 2.0).unwrap(),
    ]);
    assert_round_trip(vec![PairBed::new("chr1", 1, 2, "chr3", 4, 5).unwrap()]);
    assert_round_trip(vec![
        BedPe::new(
            "chr1",
            1,
            2,
            "chr3",
            4,
            5,
            Some("loop".to_string()),
            Some(10),
            Strand::Forward,
            Strand::Reverse,
        )
        .unwrap(),
        BedPe::new("chr1", 1, 2, "chr1", 8, 9, None, None, Strand::Unknown, Strand::Unknown)
            .unwrap(),
    ]);
}

#[test]
fn test_extended_kind() {
    let motif = |name: &str, p_value| Motif {
        motif: name.to_string(),
        p_value,
    };
    assert_round_trip(vec![
        Extended::new(
            Bed6::new("chr1", 1, 9, Some("site".to_string()), None, Strand::Reverse).unwrap(),
            motif("CTCF", Some(3)),
        )
        .unwrap(),
        Extended::new(
            Bed6::new("chr2", 1, 9, None, None, Strand::Unknown).unwrap(),
            motif("YY1", None),
        )
        .unwrap(),
    ]);
}

#[test]
fn test_list_extension_column() {
    let tagged = |tags: &[&str]| {
        Extended::new(
            Bed3::new("chr1", 1, 2).unwrap(),
            Tags {
                tags: tags.iter().map(|t| t.to_string()).collect(),
            },
        )
    };
    assert_round_trip(vec![
        tagged(&["enhancer", "open"]).unwrap(),
        tagged(&["promoter"]).unwrap(),
        tagged(&[]).unwrap(),
        tagged(&[".", "open"]).unwrap(),
    ]);

    // a lone `.` would be written exactly like the empty list
    let err = tagged(&["."]).unwrap_err();
    assert_eq!(err.field(), "tags");
}

#[test]
fn test_any_bed_keeps_each_kind() {
    let content = "chr1\t5\nchr1\t1\t2\nchr1\t1\t2\tfoo\nchr1\t1\t2\tfoo\t5\nchr1\t1\t2\t.\t.\t-\n";
    let records: Vec<AnyBed> = bedspec::bed::parse_records(content).unwrap();
    let kinds: Vec<String> = records.iter().map(|r| r.schema().name().to_string()).collect();
    assert_eq!(kinds, ["BED2", "BED3", "BED4", "BED5", "BED6"]);

    // One file holds one layout.
    let mut writer = BedWriter::<_, AnyBed>::new(Vec::new());
    writer.write(&records[1]).unwrap();
    assert!(writer.write(&records[2]).is_err());

    for record in records {
        assert_round_trip(vec![record.clone(), record]);
    }
}

#[test]
fn test_comments_survive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("annotated.bed");

    let mut writer = BedWriter::from_path(&path).unwrap();
    writer.write_comment("track name=genes").unwrap();
    writer.write_comment("built from\nthree sources").unwrap();
    writer.write(&Bed3::new("chr1", 1, 2).unwrap()).unwrap();
    writer.flush().unwrap();
    drop(writer);

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "track name=genes\n# built from\n# three sources\nchr1\t1\t2\n"
    );

    let lines: Vec<BedLine<Bed3>> = BedReader::from_path(&path)
        .unwrap()
        .lines()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        lines,
        vec![
            BedLine::Comment("track name=genes".to_string()),
            BedLine::Comment("# built from".to_string()),
            BedLine::Comment("# three sources".to_string()),
            BedLine::Record(Bed3::new("chr1", 1, 2).unwrap()),
        ]
    );
}
