#[macro_export]
macro_rules! server_config {
    ($name:expr, $pretty_name:expr, $user_agent:expr, $base_url:expr, $post_url:expr, $tag_url:expr, $user_url:expr, $comment_url:expr, $json_post_url:expr) => {
        ServerConfig {
            name: String::from($name),
            pretty_name: String::from($pretty_name),
            user_agent: String::from($user_agent),
            base_url: String::from($base_url),
            post_url: $post_url,
            tag_url: $tag_url,
            user_url: $user_url,
            comment_url: $comment_url,
            json_post_url: $json_post_url,
        }
    };
}

/// Search endpoint of a gelbooru `index.php?page=dapi` deployment for the given `s` value.
#[macro_export]
macro_rules! dapi_url {
    ($base_url:expr, $s:literal) => {
        Some(format!("{}/index.php?page=dapi&q=index&s={}", $base_url, $s))
    };
}
