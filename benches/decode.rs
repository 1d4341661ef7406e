use criterion::{black_box, criterion_group, criterion_main, Criterion};
use imageboard_query::{decoder_for, BackendKind};

static POSTS_XML: &str = include_str!("../assets/sample_responses/posts.xml");
static TAGS_XML: &str = include_str!("../assets/sample_responses/tags.xml");
static POSTS_E621: &str = include_str!("../assets/sample_responses/e621_posts.json");

fn big_posts_page(num: u64) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><posts limit="{0}" offset="0" count="{0}">"#,
        num
    );
    for id in 1..=num {
        xml.push_str(&format!(
            "<post><id>{id}</id><score>{id}</score><width>1920</width><height>1080</height>\
             <md5>{id:032x}</md5><image>{id:032x}.png</image><rating>general</rating>\
             <tags>landscape scenery sky no_humans</tags><status>active</status>\
             <file_url>https://img.example/images/{id:032x}.png</file_url></post>"
        ));
    }
    xml.push_str("</posts>");
    xml
}

fn decode_bench(c: &mut Criterion) {
    let xml = decoder_for(BackendKind::PostSearch);
    let json = decoder_for(BackendKind::JsonPostSearch);

    c.bench_function("Decode sample XML posts", |b| {
        b.iter(|| black_box(xml.decode(BackendKind::PostSearch, black_box(POSTS_XML.as_bytes()))))
    });
    c.bench_function("Decode sample XML tags", |b| {
        b.iter(|| black_box(xml.decode(BackendKind::TagSearch, black_box(TAGS_XML.as_bytes()))))
    });
    c.bench_function("Decode sample JSON posts", |b| {
        b.iter(|| {
            black_box(json.decode(
                BackendKind::JsonPostSearch,
                black_box(POSTS_E621.as_bytes()),
            ))
        })
    });

    let page = big_posts_page(100);
    c.bench_function("Decode 100 XML posts", |b| {
        b.iter(|| black_box(xml.decode(BackendKind::PostSearch, black_box(page.as_bytes()))))
    });
}

criterion_group!(benches, decode_bench);
criterion_main!(benches);
