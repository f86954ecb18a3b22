//! Global CSS styles for SwipeCart.
//!
//! Card motion is driven by inline styles from the deck; this sheet only
//! sets the resting look, stacking and the toast animations.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  --page-bg: #f4f1ec;
  --card-bg: #ffffff;
  --card-border: #e4ded4;
  --card-shadow: 0 10px 30px rgba(40, 32, 20, 0.15);

  --text-primary: #24201a;
  --text-secondary: #6b645a;

  --accept: #2fa36b;
  --accept-dark: #23804f;
  --reject: #e2504c;
  --reject-dark: #b93b38;
  --brand: #3a6ea5;

  --font-sans: -apple-system, 'Segoe UI', Roboto, 'Helvetica Neue', sans-serif;

  --radius-card: 18px;
  --transition-fast: 150ms ease;
  --toast-fade: 300ms ease;
}

/* === Global Reset === */
*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

html, body {
  height: 100%;
  background: var(--page-bg);
  color: var(--text-primary);
  font-family: var(--font-sans);
  overflow-x: hidden;
}

/* === Page === */
.swipe-page {
  display: flex;
  flex-direction: column;
  align-items: center;
  min-height: 100vh;
  padding: 16px;
}

.swipe-header {
  display: flex;
  width: 100%;
  max-width: 420px;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 16px;
}

.swipe-header__title {
  font-size: 1.5rem;
  font-weight: 700;
}

.cart-badge {
  padding: 6px 12px;
  border-radius: 999px;
  background: var(--brand);
  color: #fff;
  font-size: 0.875rem;
  font-weight: 600;
}

/* === Deck === */
.swipe-widget {
  display: flex;
  flex-direction: column;
  align-items: center;
  width: 100%;
  max-width: 420px;
}

.swipe-stack {
  position: relative;
  width: 100%;
  height: 560px;
}

/* touch-action keeps vertical scrolling native while horizontal drags reach us */
.swipe-card {
  position: absolute;
  inset: 0;
  display: flex;
  flex-direction: column;
  overflow: hidden;
  background: var(--card-bg);
  border: 1px solid var(--card-border);
  border-radius: var(--radius-card);
  box-shadow: var(--card-shadow);
  touch-action: pan-y;
  user-select: none;
  -webkit-user-select: none;
  will-change: transform, opacity;
}

.swipe-card:not(.active) {
  pointer-events: none;
}

.swipe-card__image {
  width: 100%;
  height: 62%;
  object-fit: cover;
  background: #ece7df;
  pointer-events: none;
}

.swipe-card__image--empty {
  display: flex;
  align-items: center;
  justify-content: center;
  font-size: 4rem;
}

.swipe-card__body {
  display: flex;
  flex-direction: column;
  gap: 8px;
  padding: 16px 20px;
}

.swipe-card__title {
  font-size: 1.25rem;
  font-weight: 700;
}

.swipe-card__meta {
  display: flex;
  gap: 12px;
  align-items: baseline;
}

.swipe-card__price {
  color: var(--accept-dark);
  font-size: 1.125rem;
  font-weight: 700;
}

.swipe-card__condition {
  padding: 2px 8px;
  border-radius: 6px;
  background: #efeae2;
  color: var(--text-secondary);
  font-size: 0.75rem;
  text-transform: uppercase;
}

.swipe-card__description {
  color: var(--text-secondary);
  font-size: 0.875rem;
  line-height: 1.4;
  display: -webkit-box;
  -webkit-line-clamp: 3;
  -webkit-box-orient: vertical;
  overflow: hidden;
}

/* Stamps switch instantly; a transition here would bubble a transitionend */
.swipe-card__stamp {
  position: absolute;
  top: 28px;
  padding: 4px 12px;
  border: 4px solid currentColor;
  border-radius: 8px;
  font-size: 2rem;
  font-weight: 800;
  letter-spacing: 2px;
  opacity: 0;
  pointer-events: none;
}

.swipe-card__stamp--nope {
  right: 24px;
  color: var(--reject);
  transform: rotate(15deg);
}

.swipe-card__stamp--add {
  left: 24px;
  color: var(--accept);
  transform: rotate(-15deg);
}

.swipe-card.swiped-left .swipe-card__stamp--nope,
.swipe-card.swiped-right .swipe-card__stamp--add {
  opacity: 1;
}

/* === Controls === */
.swipe-controls {
  display: flex;
  gap: 32px;
  justify-content: center;
  margin-top: 24px;
}

.swipe-btn {
  width: 64px;
  height: 64px;
  border: none;
  border-radius: 50%;
  color: #fff;
  font-size: 1.75rem;
  cursor: pointer;
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
  transition: transform var(--transition-fast), background var(--transition-fast);
}

.swipe-btn:hover:not(:disabled) {
  transform: scale(1.08);
}

.swipe-btn:disabled {
  opacity: 0.5;
  cursor: default;
}

.swipe-btn--reject {
  background: var(--reject);
}

.swipe-btn--reject:hover:not(:disabled) {
  background: var(--reject-dark);
}

.swipe-btn--accept {
  background: var(--accept);
}

.swipe-btn--accept:hover:not(:disabled) {
  background: var(--accept-dark);
}

.btn {
  display: inline-block;
  padding: 10px 20px;
  border: none;
  border-radius: 8px;
  font-size: 1rem;
  font-weight: 600;
  text-decoration: none;
  cursor: pointer;
}

.btn-primary {
  background: var(--brand);
  color: #fff;
}

/* === End of deck === */
.end-of-deck {
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  gap: 12px;
  height: 100%;
  text-align: center;
}

.end-of-deck__icon {
  font-size: 3rem;
}

.end-of-deck__title {
  font-size: 1.5rem;
}

.end-of-deck__text {
  color: var(--text-secondary);
}

/* === Toasts === */
.toast-stack {
  position: fixed;
  top: 0;
  right: 0;
  z-index: 1000;
  pointer-events: none;
}

.toast {
  position: fixed;
  right: 20px;
  max-width: 320px;
  padding: 12px 18px;
  border-radius: 10px;
  color: #fff;
  font-size: 0.9rem;
  box-shadow: 0 6px 18px rgba(0, 0, 0, 0.2);
}

.toast-success {
  background: var(--accept);
}

.toast-error {
  background: var(--reject);
}

.toast--in {
  animation: toast-in var(--toast-fade) forwards;
}

.toast--out {
  animation: toast-out var(--toast-fade) forwards;
}

@keyframes toast-in {
  from { opacity: 0; transform: translateX(100%); }
  to { opacity: 1; transform: translateX(0); }
}

@keyframes toast-out {
  from { opacity: 1; transform: translateX(0); }
  to { opacity: 0; transform: translateX(100%); }
}
"#;
