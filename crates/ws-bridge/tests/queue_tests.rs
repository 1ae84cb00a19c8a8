#[cfg(test)]
mod tests {
	use std::time::Duration;
	use tokio::time::timeout;
	use ws_bridge::errors::QueueClosed;
	use ws_bridge::queue;
	use ws_bridge::TopicMessage;

	fn msg(n: usize) -> TopicMessage {
		TopicMessage::new("t", format!("m-{n}").into_bytes())
	}

	#[tokio::test]
	async fn test_push_then_next_preserves_order() {
		let (tx, mut rx) = queue::bounded(10);

		for n in 0..5 {
			tx.push(msg(n)).await.unwrap();
		}

		for n in 0..5 {
			let got = rx.next().await.unwrap();
			assert_eq!(got, msg(n));
		}
	}

	#[tokio::test]
	async fn test_close_is_idempotent() {
		let (tx, rx) = queue::bounded(2);

		tx.close();
		tx.close();
		rx.close();

		assert!(tx.is_closed());
	}

	#[tokio::test]
	async fn test_push_after_close_fails_without_blocking() {
		let (tx, _rx) = queue::bounded(1);

		tx.close();

		let result = timeout(Duration::from_millis(100), tx.push(msg(0))).await;
		assert_eq!(result.expect("push must not block after close"), Err(QueueClosed));
	}

	#[tokio::test]
	async fn test_buffered_messages_drain_in_order_after_close() {
		let (tx, mut rx) = queue::bounded(4);

		tx.push(msg(0)).await.unwrap();
		tx.push(msg(1)).await.unwrap();
		tx.close();

		assert_eq!(rx.next().await, Some(msg(0)));
		assert_eq!(rx.next().await, Some(msg(1)));
		assert_eq!(rx.next().await, None);
		// End-of-queue is absorbing.
		assert_eq!(rx.next().await, None);
	}

	#[tokio::test]
	async fn test_blocked_producer_is_released_on_close() {
		let (tx, _rx) = queue::bounded(1);

		tx.push(msg(0)).await.unwrap();

		let producer = {
			let tx = tx.clone();
			tokio::spawn(async move { tx.push(msg(1)).await })
		};

		// Give the producer time to park on the full queue.
		tokio::time::sleep(Duration::from_millis(20)).await;
		tx.close();

		let released = timeout(Duration::from_secs(1), producer).await.expect("producer leaked past close").unwrap();
		assert_eq!(released, Err(QueueClosed));
	}

	#[tokio::test]
	async fn test_close_races_inflight_enqueues_safely() {
		let (tx, mut rx) = queue::bounded(2);

		let mut producers = Vec::new();
		for n in 0..8 {
			let tx = tx.clone();
			producers.push(tokio::spawn(async move {
				loop {
					if tx.push(msg(n)).await.is_err() {
						break;
					}
				}
			}));
		}

		// Drain a little, then slam the door while producers are mid-push.
		for _ in 0..4 {
			rx.next().await;
		}
		tx.close();

		for producer in producers {
			timeout(Duration::from_secs(1), producer).await.expect("producer leaked past close").unwrap();
		}
	}

	#[tokio::test]
	async fn test_all_senders_dropped_ends_queue() {
		let (tx, mut rx) = queue::bounded(2);

		tx.push(msg(0)).await.unwrap();
		drop(tx);

		assert_eq!(rx.next().await, Some(msg(0)));
		assert_eq!(rx.next().await, None);
	}
}
