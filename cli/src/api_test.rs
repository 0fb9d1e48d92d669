use super::*;

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let api = ApiClient::new("http://localhost:3000/");
    assert_eq!(api.base_url(), "http://localhost:3000");
}

#[test]
fn board_url_follows_the_address_bar_convention() {
    let api = ApiClient::new("https://boards.example.com");
    assert_eq!(
        api.board_url("abc-123"),
        "https://boards.example.com/boards/abc-123"
    );
}

#[test]
fn svg_url_is_adjacent_to_the_board_url() {
    let api = ApiClient::new("https://boards.example.com");
    assert_eq!(
        api.svg_url("abc-123"),
        "https://boards.example.com/boards/abc-123.svg"
    );
}
