use isbndb_client::{Client, ClientError, HttpTransport, TransportError};
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn client(server: &Server) -> Client<HttpTransport> {
    Client::new("abc123").unwrap()
        .base_url(format!("{}/", server.url()))
}

#[test]
fn books_lookup_hits_endpoint_with_ordered_query() {
    let mut server = Server::new();
    let mock = server.mock("GET", "/books.xml")
        .match_query(Matcher::Exact(
            "access_key=abc123&results=subjects&index1=title&value1=Animal+Farm&page_number=2".to_owned()
        ))
        .with_status(200)
        .with_body("<ISBNdb>\n<BookList total_results=\"1\"/>\n</ISBNdb>\n")
        .create();

    let body = client(&server)
        .request_books("title", "Animal Farm", Some("subjects"), Some(2))
        .unwrap();

    mock.assert();
    assert_eq!(body, "<ISBNdb><BookList total_results=\"1\"/></ISBNdb>");
}

#[test]
fn publishers_lookup_round_trips_escaped_value() {
    let mut server = Server::new();
    let mock = server.mock("GET", "/publishers.xml")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("access_key".into(), "abc123".into()),
            Matcher::UrlEncoded("index1".into(), "name".into()),
            Matcher::UrlEncoded("value1".into(), "Simon & Schuster".into()),
        ]))
        .with_body("ok")
        .create();

    let body = client(&server).request_publishers("name", "Simon & Schuster", None, None).unwrap();

    mock.assert();
    assert_eq!(body, "ok");
}

#[test]
fn key_with_reserved_characters_reaches_server_intact() {
    let mut server = Server::new();
    let mock = server.mock("GET", "/books.xml")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("access_key".into(), "ab#c".into()),
            Matcher::UrlEncoded("index1".into(), "isbn".into()),
            Matcher::UrlEncoded("value1".into(), "0451526538".into()),
        ]))
        .with_body("ok")
        .create();

    let client = Client::new("ab#c").unwrap()
        .base_url(server.url());

    let body = client.request_books("isbn", "0451526538", None, None).unwrap();

    mock.assert();
    assert_eq!(body, "ok");
}

#[test]
fn non_success_status_is_transport_error() {
    let mut server = Server::new();
    let mock = server.mock("GET", "/authors.xml")
        .match_query(Matcher::Any)
        .with_status(503)
        .create();

    let err = client(&server).request_authors("person_id", "orwell_george", None, None).unwrap_err();

    mock.assert();
    assert_eq!(err, ClientError::Transport(TransportError::Status(503)));
}

#[test]
fn invalid_request_never_reaches_server() {
    let mut server = Server::new();
    let mock = server.mock("GET", Matcher::Any)
        .match_query(Matcher::Any)
        .expect(0)
        .create();

    let err = client(&server).request_subjects("isbn", "x", None, None).unwrap_err();

    mock.assert();
    assert!(matches!(err, ClientError::InvalidRequest(_)));
}

#[test]
fn custom_timeout_transport() {
    let mut server = Server::new();
    let mock = server.mock("GET", "/categories.xml")
        .match_query(Matcher::UrlEncoded("results".into(), "subcategories".into()))
        .with_body("a\nb")
        .create();

    let transport = HttpTransport::with_timeout(Duration::from_secs(2)).unwrap();
    let client = Client::with_transport("abc123", transport).unwrap()
        .base_url(format!("{}/", server.url()));

    let body = client.request_categories("category_id", "science", Some("subcategories"), None).unwrap();

    mock.assert();
    assert_eq!(body, "ab");
}
