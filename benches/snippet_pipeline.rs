use criterion::{Criterion, criterion_group, criterion_main};
use snipfmt_lib::beautify::{Beautifier, JsBeautifier};
use snipfmt_lib::config::Config;
use snipfmt_lib::document::DocumentFormatter;
use snipfmt_lib::placeholder;
use snipfmt_lib::snippet::SnippetFormatter;
use std::hint::black_box;

const SNIPPET: &str = "\
var callback = function(){
    ...
}
if(a==null){
b=\"x\"
}
else{
c()
}
foo(...);
bar({...});
//explain the next part
var ok = items.length &gt; 0 && items[0] !== \"none\";";

/// Generate a page with many fragments separated by prose
fn generate_document(fragments: usize) -> String {
    let mut content = String::with_capacity(fragments * 256);
    for i in 0..fragments {
        content.push_str(&format!("<h2>Step {i}</h2>\n<p>Some explanation.</p>\n"));
        content.push_str(&format!("<pre><code>{SNIPPET}</code></pre>\n"));
    }
    content
}

fn bench_snippet(c: &mut Criterion) {
    let config = Config::default();
    let formatter = SnippetFormatter::from_config(&config);
    let beautifier = JsBeautifier::new(config.beautify.clone());

    c.bench_function("protect", |b| b.iter(|| placeholder::protect(black_box(SNIPPET))));
    c.bench_function("beautify", |b| b.iter(|| beautifier.beautify(black_box(SNIPPET))));
    c.bench_function("format snippet", |b| b.iter(|| formatter.format(black_box(SNIPPET))));
}

fn bench_document(c: &mut Criterion) {
    let document = generate_document(50);
    let formatter = DocumentFormatter::default();

    c.bench_function("format document (50 fragments)", |b| {
        b.iter(|| formatter.format(black_box(&document)))
    });
}

criterion_group!(benches, bench_snippet, bench_document);
criterion_main!(benches);
