//! Randomized comparison of the overlap index against a linear scan.

use bedspec::index::IntervalIndex;
use bedspec::interval::Interval;
use bedspec::record::Bed3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const CONTIGS: [&str; 10] = [
    "chr1", "chr2", "chr3", "chr4", "chr5", "chr6", "chr7", "chr8", "chr9", "chrX",
];
const CONTIG_LEN: u64 = 1_000_000;

fn random_interval(rng: &mut SmallRng) -> Bed3 {
    let chrom = CONTIGS[rng.gen_range(0..CONTIGS.len())];
    let start = rng.gen_range(0..CONTIG_LEN);
    // Mostly short, some zero-length, a few very long.
    let len = match rng.gen_range(0..100) {
        0..=4 => 0,
        5..=7 => rng.gen_range(10_000..200_000),
        _ => rng.gen_range(1..2_000),
    };
    Bed3::new(chrom, start, start + len).unwrap()
}

fn spans<'a>(hits: impl IntoIterator<Item = &'a Bed3>) -> Vec<(u64, u64)> {
    hits.into_iter().map(|r| (r.start(), r.end())).collect()
}

struct Expected {
    overlapping: Vec<(u64, u64)>,
    enclosed_by: Vec<(u64, u64)>,
    enclosing: Vec<(u64, u64)>,
}

fn brute_force(records: &[Bed3], query: &Bed3) -> Expected {
    let (qs, qe) = (query.start(), query.end());
    let mut expected = Expected {
        overlapping: Vec::new(),
        enclosed_by: Vec::new(),
        enclosing: Vec::new(),
    };
    for r in records {
        let (rs, re) = (r.start(), r.end());
        let overlaps = rs < qe && qs < re;
        if overlaps {
            expected.overlapping.push((rs, re));
            if qs <= rs && re <= qe {
                expected.enclosed_by.push((rs, re));
            }
        }
        if rs <= qs && qe <= re {
            expected.enclosing.push((rs, re));
        }
    }
    expected.overlapping.sort_unstable();
    expected.enclosed_by.sort_unstable();
    expected.enclosing.sort_unstable();
    expected
}

#[test]
fn test_index_matches_linear_scan() {
    let mut rng = SmallRng::seed_from_u64(0x5eed_bed5);
    let records: Vec<Bed3> = (0..100_000).map(|_| random_interval(&mut rng)).collect();
    let queries: Vec<Bed3> = (0..10_000).map(|_| random_interval(&mut rng)).collect();

    let by_contig: Vec<Vec<Bed3>> = CONTIGS
        .iter()
        .map(|c| {
            records
                .iter()
                .filter(|r| r.reference_name() == *c)
                .cloned()
                .collect()
        })
        .collect();

    let index = IntervalIndex::build(records.clone()).unwrap();
    assert_eq!(index.len(), records.len());

    for query in &queries {
        let contig = CONTIGS
            .iter()
            .position(|c| *c == query.reference_name())
            .unwrap();
        let expected = brute_force(&by_contig[contig], query);

        assert_eq!(
            spans(index.overlapping(query).unwrap()),
            expected.overlapping,
            "overlapping {:?}",
            query
        );
        assert_eq!(
            index.count_overlaps(query).unwrap(),
            expected.overlapping.len()
        );
        assert_eq!(
            index.overlaps(query).unwrap(),
            !expected.overlapping.is_empty()
        );
        assert_eq!(
            spans(index.enclosed_by(query).unwrap()),
            expected.enclosed_by,
            "enclosed_by {:?}",
            query
        );
        assert_eq!(
            spans(index.enclosing(query).unwrap()),
            expected.enclosing,
            "enclosing {:?}",
            query
        );
    }
}

#[test]
fn test_par_build_answers_like_build() {
    let mut rng = SmallRng::seed_from_u64(42);
    let records: Vec<Bed3> = (0..30_000).map(|_| random_interval(&mut rng)).collect();
    let queries: Vec<Bed3> = (0..12_000).map(|_| random_interval(&mut rng)).collect();

    let sequential = IntervalIndex::build(records.clone()).unwrap();
    let parallel = IntervalIndex::par_build(records).unwrap();

    let batch = parallel.overlapping_batch(&queries).unwrap();
    for (query, hits) in queries.iter().zip(batch) {
        assert_eq!(spans(hits), spans(sequential.overlapping(query).unwrap()));
    }
}

#[test]
fn test_unknown_contig_is_empty() {
    let mut rng = SmallRng::seed_from_u64(7);
    let index = IntervalIndex::build((0..1_000).map(|_| random_interval(&mut rng))).unwrap();

    let query = ("chrUn", 0u64, CONTIG_LEN);
    assert!(index.overlapping(&query).unwrap().is_empty());
    assert!(index.enclosing(&query).unwrap().is_empty());
    assert_eq!(index.count_overlaps(&query).unwrap(), 0);
    assert!(index.records_on("chrUn").is_empty());
}
