//! End-to-end swipe scenarios
//!
//! Drives the deck the way the UI does and runs the cart round trip
//! against a throwaway HTTP server on localhost.

use std::sync::Arc;

use swipecart_core::{
    cart_notice, AppConfig, CardData, CardKey, CartClient, CartDispatcher, CartError,
    CartOutcome, DeckConfig, DeckStatus, ItemId, Point, PointerId, PointerInput, PointerResponse,
    ReleaseOutcome, SwipeDeck, SwipeDirection, ToastKind,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

// ============================================================================
// Helpers
// ============================================================================

fn shop_deck(ids: &[u64]) -> SwipeDeck {
    let cards = ids
        .iter()
        .map(|id| CardData::new(format!("Item {}", id)).with_item_id(*id))
        .collect();
    SwipeDeck::new(cards, 1000.0, DeckConfig::default()).unwrap()
}

const MOUSE: PointerId = PointerId(1);

fn drag(deck: &mut SwipeDeck, from: Point, to: Point) -> ReleaseOutcome {
    let key = deck.front().map(|c| c.key).unwrap_or(CardKey(0));
    assert!(deck.pointer_down(key, MOUSE, from));
    deck.pointer_move(MOUSE, to);
    deck.pointer_up(MOUSE)
}

/// Read one HTTP/1.1 request (headers plus Content-Length body).
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

/// Serve exactly one response, handing back the raw request it answered.
async fn serve_once(
    status: &'static str,
    content_type: &'static str,
    body: &'static str,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{}", addr), handle)
}

fn client_for(base_url: String) -> Arc<CartClient> {
    let config = AppConfig {
        base_url,
        ..Default::default()
    };
    Arc::new(
        CartClient::new(&config, Some("session-1"))
            .unwrap()
            .with_csrf_token("tok123"),
    )
}

// ============================================================================
// Gesture Scenarios
// ============================================================================

/// vw=1000, drag 100px right (threshold 80): commits right
#[test]
fn test_drag_past_threshold_commits_right() {
    let mut deck = shop_deck(&[42, 43]);
    let outcome = drag(&mut deck, Point::new(500.0, 300.0), Point::new(600.0, 300.0));

    let ReleaseOutcome::Committed(ticket) = outcome else {
        panic!("expected a commit, got {:?}", outcome);
    };
    assert_eq!(ticket.direction, SwipeDirection::Right);
    assert_eq!(ticket.item_id, Some(ItemId(42)));

    let done = deck.complete_swipe(&ticket).unwrap();
    assert_eq!(done.add_to_cart, Some(ItemId(42)));
    assert_eq!(deck.len(), 1);
}

/// vw=1000, drag 60px right: snaps back, nothing to send
#[test]
fn test_drag_under_threshold_snaps_back() {
    let mut deck = shop_deck(&[42, 43]);
    let outcome = drag(&mut deck, Point::new(500.0, 300.0), Point::new(560.0, 300.0));

    assert_eq!(outcome, ReleaseOutcome::SnappedBack);
    assert_eq!(deck.len(), 2);
    assert!(deck.pending().is_none());
    assert!(deck.front().unwrap().visual.is_identity());
}

/// Single card, either direction: deck ends with no active card
#[test]
fn test_last_card_exhausts_deck() {
    for direction in [SwipeDirection::Left, SwipeDirection::Right] {
        let mut deck = shop_deck(&[7]);
        let ticket = match direction {
            SwipeDirection::Left => deck.reject(),
            SwipeDirection::Right => deck.accept(),
        }
        .unwrap();

        let done = deck.complete_swipe(&ticket).unwrap();
        assert!(done.exhausted());
        assert_eq!(deck.status(), DeckStatus::Exhausted);
        assert!(deck.front().is_none());
        assert!(!deck.is_animating());
    }
}

/// Leftward drag of the full clamp commits left and never reaches the cart
#[test]
fn test_left_drag_rejects() {
    let mut deck = shop_deck(&[1, 2, 3]);
    let outcome = drag(&mut deck, Point::new(500.0, 300.0), Point::new(-400.0, 310.0));
    let ReleaseOutcome::Committed(ticket) = outcome else {
        panic!("expected a commit");
    };
    assert_eq!(ticket.direction, SwipeDirection::Left);
    assert_eq!(deck.front().unwrap().visual.translate_x, -2000.0);
    assert_eq!(deck.complete_swipe(&ticket).unwrap().add_to_cart, None);
}

/// Phone-width fling: the card follows the finger off the widget and
/// the release lands outside it
#[test]
fn test_fling_off_widget_commits() {
    let cards = vec![CardData::new("Lamp").with_item_id(42), CardData::new("Rug")];
    let mut deck = SwipeDeck::new(cards, 480.0, DeckConfig::default()).unwrap();
    let finger = PointerId(3);

    let grab = PointerInput::Down {
        key: CardKey(0),
        pointer: finger,
        point: Point::new(240.0, 400.0),
    };
    assert!(matches!(
        deck.handle_pointer(grab),
        PointerResponse::Capture { .. }
    ));
    for x in [300.0, 420.0, 470.0, 900.0] {
        let step = PointerInput::Move {
            pointer: finger,
            point: Point::new(x, 405.0),
        };
        assert!(deck.routes(&step));
        assert!(deck.handle_pointer(step).should_prevent_default());
    }

    let PointerResponse::Committed(ticket) =
        deck.handle_pointer(PointerInput::Up { pointer: finger })
    else {
        panic!("expected a commit");
    };
    assert_eq!(ticket.item_id, Some(ItemId(42)));
    assert_eq!(deck.settle(CardKey(0)).unwrap().add_to_cart, Some(ItemId(42)));
    assert_eq!(deck.len(), 1);
}

/// A second finger touching down mid-drag neither moves nor drops the card
#[test]
fn test_second_finger_is_ignored() {
    let mut deck = shop_deck(&[7, 8]);
    let first = PointerId(1);
    let second = PointerId(2);

    deck.handle_pointer(PointerInput::Down {
        key: CardKey(0),
        pointer: first,
        point: Point::new(500.0, 300.0),
    });
    deck.handle_pointer(PointerInput::Move {
        pointer: first,
        point: Point::new(540.0, 300.0),
    });

    let stray = [
        PointerInput::Down {
            key: CardKey(0),
            pointer: second,
            point: Point::new(100.0, 300.0),
        },
        PointerInput::Move {
            pointer: second,
            point: Point::new(900.0, 300.0),
        },
        PointerInput::Up { pointer: second },
    ];
    for input in stray {
        assert_eq!(deck.handle_pointer(input), PointerResponse::Ignored);
    }
    assert!(deck.is_dragging());
    assert_eq!(deck.front().unwrap().visual.translate_x, 40.0);

    assert_eq!(
        deck.handle_pointer(PointerInput::Up { pointer: first }),
        PointerResponse::SnappedBack
    );
    assert_eq!(deck.len(), 2);
}

/// Tearing the widget down mid-animation leaves the deck where it was
#[test]
fn test_teardown_during_fly_off() {
    let mut deck = shop_deck(&[1, 2]);
    let ticket = deck.accept().unwrap();

    deck.dispose();
    assert!(deck.settle(ticket.key).is_none());
    assert!(deck.complete_swipe(&ticket).is_none());
    assert_eq!(deck.len(), 2);
    assert_eq!(deck.status(), DeckStatus::Disposed);
}

// ============================================================================
// Cart Scenarios
// ============================================================================

/// Server says out of stock: error toast carries its text, card is gone anyway
#[tokio::test]
async fn test_out_of_stock_shows_server_error() {
    let (base_url, server) = serve_once(
        "200 OK",
        "application/json",
        r#"{"success": false, "error": "Out of stock"}"#,
    )
    .await;
    let dispatcher = CartDispatcher::new(client_for(base_url));

    let mut deck = shop_deck(&[42, 43]);
    let outcome = drag(&mut deck, Point::new(500.0, 300.0), Point::new(600.0, 300.0));
    let ReleaseOutcome::Committed(ticket) = outcome else {
        panic!("expected a commit");
    };
    let done = deck.complete_swipe(&ticket).unwrap();
    assert_eq!(deck.len(), 1);

    let request = dispatcher.dispatch(done.add_to_cart.unwrap());
    let result = request.outcome().await;
    assert_eq!(
        cart_notice(&result),
        (ToastKind::Error, "Out of stock".to_string())
    );
    // Card stays removed whatever the store said
    assert_eq!(deck.len(), 1);

    let raw = server.await.unwrap();
    let lower = raw.to_lowercase();
    assert!(raw.starts_with("POST /cart/add/42/ HTTP/1.1"));
    assert!(lower.contains("x-csrftoken: tok123"));
    assert!(lower.contains("cookie: sessionid=session-1"));
    assert!(raw.ends_with("csrfmiddlewaretoken=tok123"));
}

#[tokio::test]
async fn test_success_shows_server_message() {
    let (base_url, server) = serve_once(
        "200 OK",
        "application/json",
        r#"{"success": true, "message": "Lamp added to cart", "cart_count": 2}"#,
    )
    .await;
    let client = client_for(base_url);

    let result = client.add_to_cart(ItemId(9)).await;
    assert_eq!(
        result.as_ref().unwrap(),
        &CartOutcome::Added {
            message: "Lamp added to cart".to_string(),
            cart_count: Some(2),
        }
    );
    assert_eq!(
        cart_notice(&result),
        (ToastKind::Success, "Lamp added to cart".to_string())
    );
    server.await.unwrap();
}

/// Non-2xx is a transport-level failure even with a JSON body
#[tokio::test]
async fn test_http_error_is_generic() {
    let (base_url, server) = serve_once(
        "400 Bad Request",
        "application/json",
        r#"{"error": "You cannot add your own items to cart"}"#,
    )
    .await;
    let client = client_for(base_url);

    let result = client.add_to_cart(ItemId(3)).await;
    assert!(matches!(result, Err(CartError::Http(400))));
    assert_eq!(
        cart_notice(&result),
        (ToastKind::Error, "Error adding to cart".to_string())
    );
    server.await.unwrap();
}

#[tokio::test]
async fn test_html_error_page_is_decode_error() {
    let (base_url, server) = serve_once("200 OK", "text/html", "<h1>Login</h1>").await;
    let client = client_for(base_url);

    let result = client.add_to_cart(ItemId(3)).await;
    assert!(matches!(result, Err(CartError::Decode(_))));
    server.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_store_is_transport_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}", addr));
    let result = client.add_to_cart(ItemId(1)).await;
    assert!(matches!(result, Err(CartError::Transport(_))));
}

#[tokio::test]
async fn test_csrf_token_bootstrap_from_browse_page() {
    let (base_url, server) = serve_once(
        "200 OK",
        "text/html",
        r#"<form><input type="hidden" name="csrfmiddlewaretoken" value="fromPage"></form>"#,
    )
    .await;
    let config = AppConfig {
        base_url,
        ..Default::default()
    };
    let client = CartClient::new(&config, None).unwrap();

    let token = client.fetch_csrf_token().await.unwrap();
    assert_eq!(token.as_deref(), Some("fromPage"));
    assert_eq!(client.csrf_token().as_deref(), Some("fromPage"));

    let raw = server.await.unwrap();
    assert!(raw.starts_with("GET /browse/ HTTP/1.1"));
}

/// Teardown aborts requests that have not answered yet
#[tokio::test]
async fn test_cancel_all_aborts_in_flight_requests() {
    // Accepts but never answers
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        drop(socket);
    });

    let dispatcher = CartDispatcher::new(client_for(format!("http://{}", addr)));
    let request = dispatcher.dispatch(ItemId(5));
    assert_eq!(dispatcher.in_flight(), 1);

    assert_eq!(dispatcher.cancel_all(), 1);
    assert!(matches!(request.outcome().await, Err(CartError::Cancelled)));
    assert_eq!(dispatcher.in_flight(), 0);
    server.abort();
}
