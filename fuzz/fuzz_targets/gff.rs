#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate gff_io;
extern crate criterion;

use gff_io::gff::{Entry, ReaderBuilder, Writer};


fuzz_target!(|data: &[u8]| {
    let mut reader = ReaderBuilder::new()
        .capacity(3)
        .time_format("%Y-%m-%d")
        .from_reader(data);
    let mut writer = Writer::new(vec![], 2, 60, false).unwrap();
    let mut line = vec![];
    let mut count: usize = 0;

    while let Some(result) = reader.next() {
        match result {
            Ok(Entry::Feature(f)) => {
                line.clear();
                writer.format_record(&f, &mut line);
                count += line.len();
            }
            Ok(Entry::Directive(d)) => count += writer.write_directive(&d).unwrap(),
            Err(_) => {}
        }
    }
    criterion::black_box(count);
    criterion::black_box(writer.close().unwrap());
});
