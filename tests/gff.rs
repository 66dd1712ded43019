#[macro_use]
extern crate matches;
#[macro_use]
extern crate lazy_static;

use gff_io::gff::{
    Directive, Entry, ErrorKind, FeatureRecord, MetaSequence, Reader, ReaderBuilder,
    SequenceRegion, Strand, FRAME_UNSET,
};
use gff_io::policy::DoubleUntilLimited;
use gff_io::{MolType, MolTypeTable, Position};
use std::io::Cursor;

const GFF: &[u8] = b"##gff-version 2
##source-version annotator 1.2
# a comment line
##sequence-region ctg1 1 1000

ctg1\tmaker\tgene\t5\t10\t0.5\t+\t.\tID=g1
ctg1\tmaker\tCDS\t5\t10\tNA\t-\t2\tParent=g1\tfirst exon
##Type Protein
prot1\tpfam\tdomain\t3\t40\t1e-5\t+\t1\tName=kinase
##DNA ctg1
##ACGT
##GG TT

##end-DNA
##organism yeast
";

lazy_static! {
    static ref EXPECTED: Vec<Entry> = vec![
        Entry::Directive(Directive::Version(2)),
        Entry::Directive(Directive::SourceVersion(b"annotator 1.2".to_vec())),
        Entry::Directive(Directive::SequenceRegion(SequenceRegion {
            id: b"ctg1".to_vec(),
            start: 0,
            end: 1000,
        })),
        Entry::Feature(FeatureRecord {
            location: b"ctg1".to_vec(),
            source: b"maker".to_vec(),
            feature: b"gene".to_vec(),
            start: 4,
            end: 10,
            score: 0.5,
            strand: Strand::Forward,
            frame: FRAME_UNSET,
            mol_type: MolType::Dna,
            attributes: b"ID=g1".to_vec(),
            comments: None,
        }),
        Entry::Feature(FeatureRecord {
            location: b"ctg1".to_vec(),
            source: b"maker".to_vec(),
            feature: b"CDS".to_vec(),
            start: 4,
            end: 10,
            score: 0.,
            strand: Strand::Reverse,
            frame: 2,
            mol_type: MolType::Dna,
            attributes: b"Parent=g1".to_vec(),
            comments: Some(b"first exon".to_vec()),
        }),
        Entry::Directive(Directive::Type(MolType::Protein)),
        Entry::Feature(FeatureRecord {
            location: b"prot1".to_vec(),
            source: b"pfam".to_vec(),
            feature: b"domain".to_vec(),
            start: 2,
            end: 40,
            score: 1e-5,
            strand: Strand::Forward,
            frame: 1,
            mol_type: MolType::Protein,
            attributes: b"Name=kinase".to_vec(),
            comments: None,
        }),
        Entry::Directive(Directive::Sequence(MetaSequence {
            id: b"ctg1".to_vec(),
            mol_type: MolType::Dna,
            seq: b"ACGTGGTT".to_vec(),
        })),
        Entry::Directive(Directive::Other(b"organism yeast".to_vec())),
    ];
}

fn with_crlf(input: &[u8]) -> Vec<u8> {
    let mut out = vec![];
    for &b in input {
        if b == b'\n' {
            out.push(b'\r');
        }
        out.push(b);
    }
    out
}

#[test]
fn reader() {
    // try different line endings and initial capacities to test
    // buffer growing
    for input in [GFF.to_vec(), with_crlf(GFF)] {
        for cap in 3..80 {
            let mut reader = Reader::with_capacity(&input[..], cap);
            for exp in EXPECTED.iter() {
                let entry = reader.next().unwrap().unwrap();
                assert_eq!(&entry, exp, "capacity {}", cap);
            }
            assert!(reader.next().is_none());
            assert!(reader.next().is_none());
            assert_eq!(reader.version(), 2);
            assert_eq!(reader.source_version(), Some(&b"annotator 1.2"[..]));
            assert_eq!(reader.mol_type(), MolType::Protein);
        }
    }
}

#[test]
fn empty() {
    let mut reader = Reader::new(&b""[..]);
    assert!(reader.next().is_none());
    let mut reader = Reader::new(&b"\n  \n# only comments\n"[..]);
    assert!(reader.next().is_none());
}

#[test]
fn no_final_newline() {
    let mut reader = Reader::new(&b"c\ts\tf\t1\t2\t.\t.\t.\tx=1"[..]);
    let rec = reader.next().unwrap().unwrap().into_feature().unwrap();
    assert_eq!(rec.attributes, b"x=1");
    assert!(reader.next().is_none());
}

#[test]
fn coordinate_base() {
    let line = &b"c\ts\tf\t5\t10\t.\t.\t.\t\n"[..];
    let one = Reader::new(line).next().unwrap().unwrap().into_feature().unwrap();
    assert_eq!((one.start, one.end), (4, 10));
    let zero = ReaderBuilder::new()
        .one_based(false)
        .from_reader(line)
        .next()
        .unwrap()
        .unwrap()
        .into_feature()
        .unwrap();
    assert_eq!((zero.start, zero.end), (5, 10));
}

#[test]
fn coercion() {
    let input = b"c\ts\tf\tx\ty\tNA\t?\tx\t\n";
    let rec = Reader::new(&input[..]).next().unwrap().unwrap().into_feature().unwrap();
    assert_eq!((rec.start, rec.end), (0, 0));
    assert_eq!(rec.score, 0.);
    assert_eq!(rec.strand, Strand::None);
    assert_eq!(rec.frame, FRAME_UNSET);
}

#[test]
fn version_fallback() {
    let mut reader = ReaderBuilder::new()
        .version(3)
        .from_reader(&b"##gff-version 1\n##gff-version two\n##gff-version\n"[..]);
    assert_matches!(reader.next(), Some(Ok(Entry::Directive(Directive::Version(1)))));
    assert_eq!(reader.version(), 1);
    assert_matches!(reader.next(), Some(Ok(Entry::Directive(Directive::Version(3)))));
    assert_matches!(reader.next(), Some(Ok(Entry::Directive(Directive::Version(3)))));
    assert_eq!(reader.version(), 3);
}

#[test]
fn incomplete_directives() {
    for d in &[
        "source-version",
        "date",
        "Type",
        "sequence-region ctg1 1",
        "DNA",
        "RNA",
        "Protein",
    ] {
        let input = format!("##{}\n", d);
        let mut reader = ReaderBuilder::new()
            .time_format("%Y-%m-%d")
            .from_reader(input.as_bytes());
        let err = reader.next().unwrap().unwrap_err();
        assert_matches!(err.kind(), &ErrorKind::IncompleteDirective { .. });
        assert_eq!(err.position(), Some(&Position::new(1, 0)));
        assert!(!err.is_fatal());
        assert!(format!("{}", err).contains("incomplete"), "{}", err);
        assert!(reader.next().is_none());
    }
}

#[test]
fn source_version() {
    let mut reader = Reader::new(&b"##source-version 1.2\n"[..]);
    assert!(reader.next().unwrap().is_ok());
    assert_eq!(reader.source_version(), Some(&b"1.2"[..]));
}

#[test]
fn date() {
    let input = &b"##date 2011-03-21\n##date 21.03.2011\n"[..];
    let mut reader = ReaderBuilder::new().time_format("%Y-%m-%d").from_reader(input);
    let d = reader.next().unwrap().unwrap();
    assert_matches!(d, Entry::Directive(Directive::Date(_)));
    assert_eq!(reader.date().unwrap().to_string(), "2011-03-21 00:00:00");

    let err = reader.next().unwrap().unwrap_err();
    assert_matches!(err.kind(), &ErrorKind::InvalidDate { .. });
    assert_eq!(err.position(), Some(&Position::new(2, 18)));
    // previous date is kept
    assert_eq!(reader.date().unwrap().to_string(), "2011-03-21 00:00:00");
}

#[test]
fn date_without_format() {
    let mut reader = Reader::new(&b"##date 2011-03-21\n"[..]);
    let err = reader.next().unwrap().unwrap_err();
    assert_matches!(err.kind(), &ErrorKind::InvalidDate { .. });
    assert!(reader.date().is_none());
}

#[test]
fn sequence_region() {
    let input = &b"##sequence-region c 0 5\n##sequence-region c x 5\n##sequence-region c 1 5.5\n"[..];
    let mut reader = Reader::new(input);
    let r = reader.next().unwrap().unwrap();
    assert_eq!(
        r,
        Entry::Directive(Directive::SequenceRegion(SequenceRegion {
            id: b"c".to_vec(),
            start: 0,
            end: 5
        }))
    );
    for _ in 0..2 {
        let err = reader.next().unwrap().unwrap_err();
        assert_matches!(err.kind(), &ErrorKind::InvalidRegion { .. });
    }
    assert!(reader.next().is_none());
}

#[test]
fn mol_types() {
    let mut table = MolTypeTable::default();
    table.insert("mRNA", MolType::Rna);
    let input = &b"##Type mRNA\nc\ts\tf\t1\t2\t.\t+\t0\t\n##Type unknown\nc\ts\tf\t1\t2\t.\t+\t0\t\n"[..];
    let mut reader = ReaderBuilder::new().mol_types(table).from_reader(input);
    let feats: Vec<_> = reader.features().map(|r| r.unwrap()).collect();
    assert_eq!(feats[0].mol_type, MolType::Rna);
    assert_eq!(feats[1].mol_type, MolType::Undefined);
    assert_eq!(reader.mol_type(), MolType::Undefined);
}

#[test]
fn initial_mol_type() {
    let mut reader = ReaderBuilder::new()
        .mol_type(MolType::Protein)
        .from_reader(&b"c\ts\tf\t1\t2\t.\t+\t0\t\n"[..]);
    let rec = reader.next().unwrap().unwrap().into_feature().unwrap();
    assert_eq!(rec.mol_type, MolType::Protein);
}

#[test]
fn meta_sequence() {
    let input = &b"##DNA seq1\n##ACGT\n##GG TT\n##end-DNA\n"[..];
    let mut reader = Reader::new(input);
    assert_eq!(
        reader.next().unwrap().unwrap(),
        Entry::Directive(Directive::Sequence(MetaSequence {
            id: b"seq1".to_vec(),
            mol_type: MolType::Dna,
            seq: b"ACGTGGTT".to_vec(),
        }))
    );
    assert!(reader.next().is_none());
}

#[test]
fn meta_sequence_other_terminator() {
    // ##end-DNA does not close an RNA block
    let input = &b"##RNA r\n##ACGU\n##end-DNA\n##UU\n##end-RNA\n"[..];
    let seq = Reader::new(input).next().unwrap().unwrap();
    assert_eq!(
        seq,
        Entry::Directive(Directive::Sequence(MetaSequence {
            id: b"r".to_vec(),
            mol_type: MolType::Rna,
            seq: b"ACGUend-DNAUU".to_vec(),
        }))
    );
}

#[test]
fn corrupt_meta_sequence() {
    let input = &b"##DNA seq1\n##ACGT\nGGTT\n##end-DNA\nc\ts\tf\t1\t2\t.\t.\t.\t\n"[..];
    let mut reader = Reader::new(input);
    let err = reader.next().unwrap().unwrap_err();
    assert_matches!(err.kind(), &ErrorKind::CorruptMetaSequence { .. });
    assert_eq!(err.position(), Some(&Position::new(3, 18)));
    // resynchronization is up to the caller: reading continues
    // after the offending line
    assert_eq!(
        reader.next().unwrap().unwrap(),
        Entry::Directive(Directive::Other(b"end-DNA".to_vec()))
    );
    assert!(reader.next().unwrap().unwrap().is_feature());
}

#[test]
fn unterminated_meta_sequence() {
    let mut reader = Reader::new(&b"##Protein p\n##MKV\n"[..]);
    let err = reader.next().unwrap().unwrap_err();
    assert_matches!(
        err.kind(),
        &ErrorKind::UnexpectedEnd {
            mol_type: MolType::Protein,
            ..
        }
    );
    assert!(err.is_fatal());
    assert!(reader.next().is_none());
}

#[test]
fn buffer_limit() {
    let input = b"c\ts\tf\t1\t2\t.\t.\t.\tID=a-very-long-attribute-column\n";
    let mut reader =
        Reader::with_capacity(&input[..], 4).set_policy(DoubleUntilLimited::new(8, 16));
    let err = reader.next().unwrap().unwrap_err();
    assert_matches!(err.kind(), &ErrorKind::BufferLimit);
    assert!(reader.next().is_none());
}

#[test]
fn rewind_keeps_state() {
    let input = b"c\ts\tf\t1\t2\t.\t+\t0\t\n##Type RNA\n##gff-version 3\n";
    let mut reader = Reader::new(Cursor::new(&input[..]));
    let first: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(first.len(), 3);
    assert_eq!(first[0].feature().unwrap().mol_type, MolType::Dna);

    reader.rewind().unwrap();
    assert_eq!(reader.version(), 3);
    assert_eq!(reader.mol_type(), MolType::Rna);
    // the type declared later in the file now applies from the start
    let rec = reader.next().unwrap().unwrap().into_feature().unwrap();
    assert_eq!(rec.mol_type, MolType::Rna);
    assert_eq!(reader.position(), Some(&Position::new(1, 0)));
}

#[test]
fn into_records() {
    let mut iter = Reader::new(GFF).into_records();
    let mut n = 0;
    for res in &mut iter {
        res.unwrap();
        n += 1;
    }
    assert_eq!(n, EXPECTED.len());
    assert_eq!(iter.into_reader().mol_type(), MolType::Protein);
}
