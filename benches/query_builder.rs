use criterion::{black_box, criterion_group, criterion_main, Criterion};
use imageboard_query::{build_query, AuthToken, FilterSpec, PostFilter};
use rand::{seq::SliceRandom, thread_rng, Rng};

const PREFIX: &str = "https://gelbooru.com/index.php?page=dapi&q=index&s=post";

const TAGS: [&str; 27] = [
    "dog",
    "cat",
    "anthro",
    "gore",
    "male",
    "female",
    "skadi_(arknights)",
    "colored_nails",
    "claws",
    "abs",
    "shirt",
    "rating:general",
    "tall",
    "abstract",
    "pokemon",
    "human",
    "wolf",
    "fox",
    "cervid",
    "deer",
    "whale",
    "helicopter",
    "sword",
    "gun",
    "-blood",
    "painting",
    "score:>=10",
];

fn seed_filters(num: usize) -> Vec<FilterSpec> {
    let mut rng = thread_rng();

    (0..num)
        .map(|_| {
            let rn = rng.gen_range(0..=27);
            let tags = TAGS
                .choose_multiple(&mut rng, rn)
                .map(|t| t.to_string())
                .collect();

            PostFilter {
                limit: Some(rng.gen_range(1..=100)),
                page: Some(rng.gen_range(0..200)),
                tags,
                ..Default::default()
            }
            .into()
        })
        .collect()
}

fn query_builder_bench(c: &mut Criterion) {
    let auth = AuthToken::new("0123456789abcdef", "1234");

    for size in [20, 100, 1000] {
        let filters = seed_filters(size);
        c.bench_function(&format!("Build {} post queries", size), |b| {
            b.iter(|| {
                for filter in &filters {
                    let _ = black_box(build_query(PREFIX, black_box(filter), auth.as_ref()));
                }
            })
        });
    }
}

criterion_group!(benches, query_builder_bench);
criterion_main!(benches);
