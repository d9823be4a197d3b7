mod console_tests {
    use std::time::Duration;

    use tokio::sync::{mpsc, oneshot};
    use tokio::task;

    use crate::console::display_context;
    use crate::detector::{ConcentrationReading, DetectorConfig, GasDetector};
    use crate::error::{ErrorKind, GasError};
    use crate::measurements::{MockVoltageSource, SampleCadence, ThreadSleep};
    use crate::worker::DetectorEvent;

    const BACKLOG: usize = 4;

    fn reading() -> ConcentrationReading {
        let mut source = MockVoltageSource::new();
        source.expect_read_voltage().returning(|_| Ok(100.0));
        let config = DetectorConfig {
            reading: SampleCadence::new(1, Duration::from_millis(1)),
            ..DetectorConfig::default()
        };
        let mut detector = GasDetector::new(source, ThreadSleep, config, Some(4.807)).unwrap();
        detector.read_concentrations().unwrap()
    }

    #[tokio::test]
    async fn prints_calibration_readings_and_farewell() {
        let (tx, rx) = mpsc::channel(BACKLOG);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let reading = reading();

        let driver = async move {
            tx.send(Ok(DetectorEvent::Ready { ro: 4.807, calibrated: true })).await.unwrap();
            tx.send(Ok(DetectorEvent::Reading(reading))).await.unwrap();
            // every permit back means both events were printed
            while tx.capacity() < BACKLOG {
                task::yield_now().await;
            }
            stop_tx.send(()).unwrap();
            tx
        };
        let shutdown = async move {
            let _ = stop_rx.await;
        };

        let mut out = Vec::new();
        let (result, _tx) = tokio::join!(display_context(rx, shutdown, &mut out, false), driver);
        assert!(result.is_ok());

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Done ...\n\nCO: "), "{text}");
        assert!(text.contains("\nSMOKE: "));
        assert!(text.ends_with(" ppm\n\n\nAborted by user!\n"), "{text}");
    }

    #[tokio::test]
    async fn supplied_ro_prints_no_calibration_notice() {
        let (tx, rx) = mpsc::channel(BACKLOG);
        tx.send(Ok(DetectorEvent::Ready { ro: 4.807, calibrated: false })).await.unwrap();
        tx.send(Err(GasError::transport(std::io::Error::other("nack")))).await.unwrap();

        let mut out = Vec::new();
        let result = display_context(rx, std::future::pending(), &mut out, false).await;

        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn worker_error_ends_the_loop() {
        let (tx, rx) = mpsc::channel(BACKLOG);
        tx.send(Err(GasError::NonPositiveVoltage { voltage: 0.0 })).await.unwrap();

        let mut out = Vec::new();
        let err = display_context(rx, std::future::pending(), &mut out, false)
            .await
            .unwrap_err();

        let cause = err.downcast_ref::<GasError>().unwrap();
        assert_eq!(cause.kind(), ErrorKind::Domain);
        assert!(!String::from_utf8(out).unwrap().contains("Aborted by user!"));
    }

    #[tokio::test]
    async fn vanished_worker_is_an_error() {
        let (tx, rx) = mpsc::channel::<Result<DetectorEvent, GasError>>(BACKLOG);
        drop(tx);

        let mut out = Vec::new();
        assert!(display_context(rx, std::future::pending(), &mut out, false).await.is_err());
    }

    #[tokio::test]
    async fn shutdown_before_any_event_is_clean() {
        let (_tx, rx) = mpsc::channel::<Result<DetectorEvent, GasError>>(BACKLOG);

        let mut out = Vec::new();
        display_context(rx, async {}, &mut out, false).await.unwrap();

        assert_eq!(out, b"\nAborted by user!\n");
    }
}
