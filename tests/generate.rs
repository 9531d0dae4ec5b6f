mod common;

use std::fs;

use spacetraveling::commands::generate;
use spacetraveling::Site;

fn site(dir: &std::path::Path) -> Site {
    let documents = serde_json::to_string(&common::documents()).expect("serialize fixtures");
    fs::write(dir.join("posts.json"), documents).expect("write fixtures");
    fs::create_dir_all(dir.join("static/img")).expect("static dir");
    fs::write(dir.join("static/logo.svg"), "<svg></svg>").expect("logo");
    fs::write(dir.join("static/img/banner.png"), "png").expect("banner");

    let mut config = common::config();
    config.cms.fixtures = Some("posts.json".to_string());
    Site::with_config(dir.to_path_buf(), config)
}

#[tokio::test]
async fn generates_full_site() {
    let dir = tempfile::tempdir().unwrap();
    let site = site(dir.path());

    let stats = generate::run_with_stats(&site).await.unwrap();
    assert_eq!(stats.list_pages, 3);
    assert_eq!(stats.posts, 3);
    assert_eq!(stats.skipped, 0);
    assert_eq!(stats.assets, 2);

    let public = &site.public_dir;
    assert!(public.join("logo.svg").exists());
    assert!(public.join("img/banner.png").exists());

    let index = fs::read_to_string(public.join("index.html")).unwrap();
    assert!(index.contains("Como utilizar Hooks"));
    assert_eq!(common::data_next(&index).as_deref(), Some("/page/2.html"));

    let page2 = fs::read_to_string(public.join("page/2.html")).unwrap();
    assert!(page2.contains("Criando um app CRA do zero"));
    assert_eq!(common::data_next(&page2).as_deref(), Some("/page/3.html"));

    let page3 = fs::read_to_string(public.join("page/3.html")).unwrap();
    assert!(page3.contains("Rust sem medo"));
    assert_eq!(common::data_next(&page3).as_deref(), Some(""));

    for uid in ["como-utilizar-hooks", "criando-um-app-cra-do-zero", "rust-sem-medo"] {
        assert!(public.join("post").join(uid).join("index.html").exists(), "{}", uid);
    }
}

#[tokio::test]
async fn clean_removes_output() {
    let dir = tempfile::tempdir().unwrap();
    let site = site(dir.path());

    site.generate().await.unwrap();
    assert!(site.public_dir.join("index.html").exists());

    site.clean().unwrap();
    assert!(!site.public_dir.exists());
}
